use super::*;

const HEADER: &str = "item_id,shop_id,name,price,stock,description,tier_variation,global_attribute_details,level1_global_be_category,level2_global_be_category,level3_global_be_category,is_rich_text,ctime\n";

fn load(body: &str) -> Result<Catalog, CatalogError> {
    Catalog::from_reader(format!("{HEADER}{body}").as_bytes())
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// -----------------------------------------------------------------------
// loading
// -----------------------------------------------------------------------

#[test]
fn loads_rows_in_source_order() {
    let catalog = load(
        "2,9,Skirt B,150000,3,,,,Women Clothes,Skirts,,False,1700000000\n\
         1,9,Skirt A,120000,0,,,,Women Clothes,Skirts,,True,1700000001\n",
    )
    .unwrap();
    let ids: Vec<i64> = catalog.rows().iter().map(|r| r.item_id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn decodes_typed_fields() {
    let catalog = load(
        "23649650636,418901918,Pleated Skirt,149000.0,12,\"Soft\nfabric\",\"[{name=Colors, options=[Black]}]\",,Women Clothes,Skirts,Midi Skirts,True,1700000000\n",
    )
    .unwrap();
    let row = catalog.get(23_649_650_636).unwrap();
    assert_eq!(row.shop_id, 418_901_918);
    assert_eq!(row.name, "Pleated Skirt");
    assert_eq!(row.price, dec("149000.0"));
    assert_eq!(row.stock, 12);
    assert_eq!(row.description.as_deref(), Some("Soft\nfabric"));
    assert_eq!(
        row.tier_variation.as_deref(),
        Some("[{name=Colors, options=[Black]}]")
    );
    assert!(row.global_attribute_details.is_none());
    assert_eq!(row.level3_global_be_category.as_deref(), Some("Midi Skirts"));
    assert!(row.is_rich_text);
}

#[test]
fn keeps_unmodeled_columns_as_extra() {
    let catalog = load("1,9,Skirt,100,1,,,,A,B,C,False,1700000000\n").unwrap();
    let row = catalog.get(1).unwrap();
    assert_eq!(row.extra["ctime"].as_deref(), Some("1700000000"));
    assert_eq!(row.extra.len(), 1);
}

#[test]
fn blank_extra_cell_is_none() {
    let catalog = load("1,9,Skirt,100,1,,,,A,B,C,False,\n").unwrap();
    let row = catalog.get(1).unwrap();
    assert_eq!(row.extra.get("ctime"), Some(&None));
    assert!(row.description.is_none());
}

#[test]
fn columns_named_like_derived_fields_are_not_extra() {
    let catalog = Catalog::from_reader(
        "item_id,shop_id,name,price,stock,image,url,colors,size,ctime\n\
         1,10,Skirt,100,1,rawhash,raw-url,Red,M,1700000000\n"
            .as_bytes(),
    )
    .unwrap();
    let extra = &catalog.get(1).unwrap().extra;
    let keys: Vec<&str> = extra.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["ctime"]);
}

#[test]
fn accepts_whole_float_integers() {
    let catalog = load("1.0,9.0,Skirt,100,4.0,,,,A,,,0.0,\n").unwrap();
    let row = catalog.get(1).unwrap();
    assert_eq!(row.shop_id, 9);
    assert_eq!(row.stock, 4);
    assert!(!row.is_rich_text);
}

#[test]
fn accepts_scientific_price() {
    let catalog = load("1,9,Skirt,1.5e5,4,,,,A,,,,\n").unwrap();
    assert_eq!(catalog.get(1).unwrap().price, dec("150000"));
}

#[test]
fn optional_columns_may_be_missing() {
    let catalog =
        Catalog::from_reader("item_id,shop_id,name,price,stock\n7,9,Bag,50000,2\n".as_bytes())
            .unwrap();
    let row = catalog.get(7).unwrap();
    assert!(row.description.is_none());
    assert!(row.tier_variation.is_none());
    assert_eq!(row.categories().count(), 0);
    assert!(!row.is_rich_text);
}

#[test]
fn missing_required_column_is_an_error() {
    let err = Catalog::from_reader("item_id,shop_id,name,stock\n1,9,Bag,2\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingColumn("price")));
}

#[test]
fn fractional_stock_is_an_error() {
    let err = load("1,9,Skirt,100,2.5,,,,A,,,,\n").unwrap_err();
    assert!(
        matches!(err, CatalogError::InvalidField { column: "stock", line: 2, .. }),
        "got {err:?}"
    );
}

#[test]
fn negative_stock_is_an_error() {
    let err = load("1,9,Skirt,100,-1,,,,A,,,,\n").unwrap_err();
    assert!(matches!(err, CatalogError::InvalidField { column: "stock", .. }));
}

#[test]
fn non_numeric_price_is_an_error() {
    let err = load("1,9,Skirt,cheap,1,,,,A,,,,\n").unwrap_err();
    assert!(
        matches!(err, CatalogError::InvalidField { column: "price", ref reason, .. } if reason.contains("cheap"))
    );
}

#[test]
fn blank_or_nan_price_fails_the_load() {
    for cell in ["", "NaN"] {
        let err = load(&format!("1,9,Skirt,{cell},1,,,,A,,,,\n")).unwrap_err();
        assert!(
            matches!(err, CatalogError::InvalidField { column: "price", line: 2, .. }),
            "unexpected error for {cell:?}: {err:?}"
        );
    }
}

#[test]
fn nan_stock_fails_the_load() {
    let err = load("1,9,Skirt,100,NaN,,,,A,,,,\n").unwrap_err();
    assert!(matches!(err, CatalogError::InvalidField { column: "stock", .. }));
}

#[test]
fn bad_flag_is_an_error() {
    let err = load("1,9,Skirt,100,1,,,,A,,,maybe,\n").unwrap_err();
    assert!(matches!(err, CatalogError::InvalidField { column: "is_rich_text", .. }));
}

#[test]
fn duplicate_item_id_is_an_error() {
    let err = load("1,9,Skirt,100,1,,,,A,,,,\n1,9,Skirt,100,1,,,,A,,,,\n").unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateItemId { item_id: 1 }));
}

#[test]
fn missing_file_is_io_error() {
    let err = Catalog::from_path(Path::new("/nonexistent/catalog.csv")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { ref path, .. } if path.contains("nonexistent")));
}

// -----------------------------------------------------------------------
// selection
// -----------------------------------------------------------------------

#[test]
fn get_unknown_id_is_none() {
    let catalog = load("1,9,Skirt,100,1,,,,A,,,,\n").unwrap();
    assert!(catalog.get(2).is_none());
}

#[test]
fn in_category_matches_any_level_ignoring_case() {
    let catalog = load(
        "1,9,A,100,1,,,,Women Clothes,Skirts,,,\n\
         2,9,B,100,1,,,,Women Clothes,Dresses,,,\n\
         3,9,C,100,1,,,,Bags,,SKIRTS,,\n",
    )
    .unwrap();
    let ids: Vec<i64> = catalog.in_category("skirts").map(|r| r.item_id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(catalog.in_category("WOMEN CLOTHES").count(), 2);
    assert_eq!(catalog.in_category("Shoes").count(), 0);
}

#[test]
fn empty_catalog_has_no_rows() {
    let catalog = Catalog::from_rows(Vec::new()).unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.in_category("anything").count(), 0);
}
