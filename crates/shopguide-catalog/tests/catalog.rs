//! End-to-end tests over `tests/fixtures/catalog.csv`.
//!
//! The fixture holds six skirts and one dress. Two skirts are out of stock,
//! one has no `tier_variation`, and one carries a malformed variation cell.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use shopguide_catalog::{Catalog, CatalogError, LookupError, ProductService, SearchQuery};
use shopguide_core::{AttributeValue, PriceRange};
use shopguide_parse::LinkFormatter;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.csv")
}

fn service() -> ProductService {
    let catalog = Catalog::from_path(&fixture_path()).expect("fixture catalog should load");
    ProductService::new(catalog, LinkFormatter::default())
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn search_ids(svc: &ProductService, query: &SearchQuery) -> Vec<i64> {
    svc.search(query).iter().map(|r| r.item_id).collect()
}

// -----------------------------------------------------------------------
// loading
// -----------------------------------------------------------------------

#[test]
fn loads_every_fixture_row() {
    let svc = service();
    assert_eq!(svc.catalog().len(), 7);
    let wrap = svc.catalog().get(1005).unwrap();
    assert_eq!(wrap.price, dec("175000"));
    assert_eq!(wrap.stock, 3);
}

#[test]
fn missing_file_is_io_error() {
    let err = Catalog::from_path(&fixture_path().with_file_name("absent.csv")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

// -----------------------------------------------------------------------
// detail
// -----------------------------------------------------------------------

#[test]
fn detail_for_fully_described_item() {
    let detail = service().resolve_raw("1001").unwrap();
    assert_eq!(detail.name, "Pleated Midi Skirt");
    assert_eq!(detail.description, "Rok plisket bahan premium");
    assert_eq!(detail.colors, vec!["Black", "Navy"]);
    assert_eq!(detail.size, vec!["S", "M"]);
    assert_eq!(detail.image, "https://cf.shopee.sg/file/a1b2c3/");
    assert_eq!(detail.url, "https://shopee.co.id/product/418901918/1001/");
    assert_eq!(
        detail.global_attribute_details["Material"],
        AttributeValue::Single("Polyester".to_string())
    );
    assert_eq!(detail.extra["ctime"].as_deref(), Some("1700000000"));
}

#[test]
fn detail_for_item_with_malformed_variation() {
    let detail = service().resolve(1005).unwrap();
    assert!(detail.colors.is_empty());
    assert!(detail.size.is_empty());
    assert_eq!(detail.image, "No image available.");
    assert_eq!(
        detail.global_attribute_details["Material"],
        AttributeValue::Multiple(vec!["Linen".to_string(), "Cotton".to_string()])
    );
}

#[test]
fn detail_image_from_standalone_images_record() {
    let detail = service().resolve(1007).unwrap();
    assert_eq!(detail.image, "https://cf.shopee.sg/file/c0ffee/");
}

#[test]
fn detail_serializes_flat_json() {
    let detail = service().resolve(1002).unwrap();
    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["item_id"], 1002);
    assert_eq!(json["price"], "99000");
    assert_eq!(json["ctime"], "1700000100");
    assert_eq!(json["image"], "No image available.");
    assert_eq!(json["colors"], serde_json::json!([]));
}

#[test]
fn export_image_and_url_columns_do_not_override_derived_links() {
    let csv = "item_id,shop_id,name,price,stock,tier_variation,image,url\n\
               1,10,Skirt,100000,2,\"[{name=Colors, options=[Red], images=[h1]}]\",rawhash,raw-url\n";
    let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
    let svc = ProductService::new(catalog, LinkFormatter::default());
    let detail = svc.resolve(1).unwrap();

    let text = serde_json::to_string(&detail).unwrap();
    assert_eq!(text.matches("\"image\":").count(), 1, "duplicate image key in {text}");
    assert_eq!(text.matches("\"url\":").count(), 1, "duplicate url key in {text}");
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["image"], "https://cf.shopee.sg/file/h1/");
    assert_eq!(json["url"], "https://shopee.co.id/product/10/1/");
}

#[test]
fn unknown_item_is_not_found() {
    assert_eq!(
        service().resolve(999).unwrap_err(),
        LookupError::NotFound { item_id: 999 }
    );
}

// -----------------------------------------------------------------------
// search
// -----------------------------------------------------------------------

#[test]
fn category_only_search_returns_first_five_including_out_of_stock() {
    let svc = service();
    let query = SearchQuery::new("skirts").unwrap();
    assert_eq!(search_ids(&svc, &query), vec![1001, 1002, 1003, 1004, 1005]);
}

#[test]
fn category_matches_any_level() {
    let svc = service();
    assert_eq!(
        search_ids(&svc, &SearchQuery::new("Midi Skirts").unwrap()),
        vec![1001]
    );
    assert_eq!(
        search_ids(&svc, &SearchQuery::new("DRESSES").unwrap()),
        vec![1006]
    );
    assert_eq!(search_ids(&svc, &SearchQuery::new("Women Clothes").unwrap()).len(), 5);
}

#[test]
fn color_search_skips_mismatches_and_out_of_stock() {
    let svc = service();
    let query = SearchQuery::new("Skirts").unwrap().with_color(Some("Black"));
    assert_eq!(search_ids(&svc, &query), vec![1001, 1005, 1007]);
}

#[test]
fn size_search() {
    let svc = service();
    let query = SearchQuery::new("Skirts").unwrap().with_size(Some("L"));
    assert_eq!(search_ids(&svc, &query), vec![1003, 1005, 1007]);
}

#[test]
fn color_search_with_price_range() {
    let svc = service();
    let range = PriceRange::new(Some(dec("150000")), Some(dec("200000"))).unwrap();
    let query = SearchQuery::new("Skirts")
        .unwrap()
        .with_color(Some("Black"))
        .with_price_range(Some(range));
    let results = svc.search(&query);
    let ids: Vec<i64> = results.iter().map(|r| r.item_id).collect();
    assert_eq!(ids, vec![1005, 1007]);
    assert_eq!(results[1].url, "https://shopee.co.id/product/77310/1007/");
    assert_eq!(results[1].image, "https://cf.shopee.sg/file/c0ffee/");
}

#[test]
fn unknown_category_returns_empty() {
    let svc = service();
    assert!(svc.search(&SearchQuery::new("Shoes").unwrap()).is_empty());
}

#[test]
fn search_result_serializes_six_fields() {
    let svc = service();
    let results = svc.search(&SearchQuery::new("Dresses").unwrap());
    let json = serde_json::to_value(&results).unwrap();
    let object = json[0].as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["image", "item_id", "name", "price", "stock", "url"]);
}
