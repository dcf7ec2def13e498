use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PRODUCTS: &str = r#"[
    {"id": "123a", "name": "Arroz Branco Tio João 5kg", "category": "Mercearia", "price": 27.9},
    {"id": "456", "name": "Feijão Carioca Kicaldo 1kg", "category": "Mercearia", "price": 6.0},
    {"id": 789, "name": "Arroz Integral 5kg", "category": "Mercearia", "price": 24.5, "rating": 4.8},
    {"id": "1001", "name": "Arroz Parboilizado Camil 1kg", "category": "Mercearia", "price": 5.2},
    {"id": "2002", "name": "Café Pilão 500g", "category": "Bebidas", "price": 17.5}
]"#;

const REPORT: &str = "Código;Descrição;Quantidade\n\
    5290;CAFE PILAO 500G;120\n\
    1034;ARROZ PARBOILIZADO CAMIL 1KG;320\n";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        fixture.write("products.json", PRODUCTS);
        fixture.write("mais-vendidos.csv", REPORT);
        fixture
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("catalog-search").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .env_remove("STOREFRONT_CONFIG")
            .env_remove("STOREFRONT_API_URL")
            .env_remove("STOREFRONT_API_KEY")
            .env_remove("STOREFRONT_TIMEOUT_SECS");
        cmd
    }
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn ids(items: &serde_json::Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

fn catalog(dir: &Path, count: usize) -> PathBuf {
    let products: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("{i:03}"),
                "name": format!("Produto {i:03}"),
                "category": "Mercearia",
                "price": 1.0
            })
        })
        .collect();
    let path = dir.join("catalog.json");
    std::fs::write(&path, serde_json::to_string(&products).unwrap()).unwrap();
    path
}

#[test]
fn test_help() {
    Command::cargo_bin("catalog-search")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("suggest"))
        .stdout(predicate::str::contains("page"));
}

#[test]
fn test_search_tolerates_typo() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["search", "arros", "--products", "products.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Arroz Integral 5kg"))
        .stdout(predicate::str::contains("Feijão").not());
}

#[test]
fn test_search_ignores_accents() {
    let fx = Fixture::new();
    let value = json_stdout(fx.cmd().args(["--format", "json", "search", "FEIJAO", "-p", "products.json"]));

    assert_eq!(ids(&value["items"]), vec!["456"]);
    assert!(value["pagination"].is_null());
}

#[test]
fn test_code_lookup() {
    let fx = Fixture::new();
    let value = json_stdout(fx.cmd().args(["--format", "json", "search", "#123", "-p", "products.json"]));

    assert_eq!(ids(&value["items"]), vec!["123a"]);
    assert_eq!(value["pagination"]["page"], 1);
}

#[test]
fn test_numeric_ids_are_searchable() {
    let fx = Fixture::new();
    let value = json_stdout(fx.cmd().args(["--format", "json", "search", "#789", "-p", "products.json"]));

    assert_eq!(ids(&value["items"]), vec!["789"]);
}

#[test]
fn test_best_sellers_rank_first() {
    let fx = Fixture::new();
    let value = json_stdout(fx.cmd().args([
        "--format",
        "json",
        "search",
        "arroz",
        "-p",
        "products.json",
        "--best-sellers",
        "mais-vendidos.csv",
    ]));

    let ids = ids(&value["items"]);
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], "1001");
}

#[test]
fn test_best_sellers_from_config() {
    let fx = Fixture::new();
    fx.write(
        ".storefront.toml",
        "[search]\nbest_sellers_report = \"mais-vendidos.csv\"\n",
    );

    let value = json_stdout(fx.cmd().args(["--format", "json", "page", "-p", "products.json"]));

    // Both best sellers lead the page, then the rest by name
    assert_eq!(ids(&value["items"]), vec!["1001", "2002", "123a", "789", "456"]);
}

#[test]
fn test_empty_query_rejected() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["search", "   ", "-p", "products.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("search query is empty"));
}

#[test]
fn test_json_error_report() {
    let fx = Fixture::new();
    let output = fx
        .cmd()
        .args(["--format", "json", "search", "arroz", "-p", "nope.json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(report["code_str"], "E2001");
    assert_eq!(report["category"], "IO");
    assert!(report["message"].as_str().unwrap().contains("nope.json"));
}

#[test]
fn test_missing_products_file() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["search", "arroz", "-p", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn test_invalid_products_json() {
    let fx = Fixture::new();
    fx.write("broken.json", "[{\"id\": \"1\"");
    fx.cmd()
        .args(["search", "arroz", "-p", "broken.json"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn test_enveloped_products() {
    let fx = Fixture::new();
    fx.write(
        "envelope.json",
        r#"{"success": true, "data": [{"id": "9", "name": "Açúcar Refinado 1kg", "category": "Mercearia", "price": 4.2}]}"#,
    );
    let value = json_stdout(fx.cmd().args(["--format", "json", "search", "acucar", "-p", "envelope.json"]));

    assert_eq!(ids(&value["items"]), vec!["9"]);
}

#[test]
fn test_rejected_envelope_reports_its_error() {
    let fx = Fixture::new();
    fx.write("rejected.json", r#"{"success": false, "error": "Produtos indisponíveis"}"#);
    fx.cmd()
        .args(["search", "arroz", "-p", "rejected.json"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Produtos indisponíveis"))
        .stderr(predicate::str::contains("rejected.json"));
}

#[test]
fn test_report_without_description_column() {
    let fx = Fixture::new();
    fx.write("ruim.csv", "Código;Quantidade\n1;2\n");
    fx.cmd()
        .args(["search", "arroz", "-p", "products.json", "-b", "ruim.csv"])
        .assert()
        .code(5);
}

#[test]
fn test_page_navigation() {
    let fx = Fixture::new();
    catalog(fx.dir.path(), 30);

    let value = json_stdout(fx.cmd().args(["--format", "json", "page", "3", "-p", "catalog.json", "-s", "12"]));

    assert_eq!(value["items"].as_array().unwrap().len(), 6);
    assert_eq!(value["items"][0]["id"], "024");
    assert_eq!(value["pagination"]["total_pages"], 3);
    assert_eq!(value["total_matches"], 30);
}

#[test]
fn test_page_beyond_end_is_clamped() {
    let fx = Fixture::new();
    catalog(fx.dir.path(), 30);

    let value = json_stdout(fx.cmd().args(["--format", "json", "page", "99", "-p", "catalog.json", "-s", "12"]));

    assert_eq!(value["pagination"]["page"], 3);
}

#[test]
fn test_unsupported_page_size() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["page", "-p", "products.json", "-s", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("page size 10"));
}

#[test]
fn test_default_page_size_from_config() {
    let fx = Fixture::new();
    catalog(fx.dir.path(), 30);
    fx.write(".storefront.toml", "[pagination]\ndefault_page_size = 12\n");

    let value = json_stdout(fx.cmd().args(["--format", "json", "page", "-p", "catalog.json"]));

    assert_eq!(value["pagination"]["page_size"], 12);
    assert_eq!(value["items"].as_array().unwrap().len(), 12);
}

#[test]
fn test_invalid_config_file() {
    let fx = Fixture::new();
    fx.write(".storefront.toml", "[pagination]\ndefault_page_size = 13\n");

    fx.cmd()
        .args(["page", "-p", "products.json"])
        .assert()
        .code(3);
}

#[test]
fn test_unsupported_page_size_options_in_config() {
    let fx = Fixture::new();
    fx.write(
        ".storefront.toml",
        "[pagination]\npage_size_options = [10]\ndefault_page_size = 10\n",
    );

    fx.cmd()
        .args(["search", "arroz", "-p", "products.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("pagination.page_size_options"));
}

#[test]
fn test_text_search_ignores_page_size() {
    let fx = Fixture::new();
    let value = json_stdout(fx.cmd().args([
        "--format",
        "json",
        "search",
        "arroz",
        "-p",
        "products.json",
        "--page-size",
        "10",
    ]));

    assert_eq!(value["items"].as_array().unwrap().len(), 3);
}

#[test]
fn test_on_sale_filter_with_promotions() {
    let fx = Fixture::new();
    fx.write(
        "promocoes.json",
        r#"[
            {"productId": 456, "newPrice": 4.5, "originalPrice": 6.0, "isActive": true},
            {"productId": "2002", "newPrice": 9.9, "originalPrice": 17.5, "isActive": false}
        ]"#,
    );

    let value = json_stdout(fx.cmd().args([
        "--format",
        "json",
        "page",
        "-p",
        "products.json",
        "--promotions",
        "promocoes.json",
        "--filter",
        "on-sale",
    ]));

    assert_eq!(ids(&value["items"]), vec!["456"]);
    assert_eq!(value["items"][0]["price"], 4.5);
    assert_eq!(value["filter"], "on-sale");
}

#[test]
fn test_category_filter() {
    let fx = Fixture::new();
    let value = json_stdout(fx.cmd().args(["--format", "json", "page", "-p", "products.json", "--filter", "Bebidas"]));

    assert_eq!(ids(&value["items"]), vec!["2002"]);
}

#[test]
fn test_suggest() {
    let fx = Fixture::new();
    let value = json_stdout(fx.cmd().args(["--format", "json", "suggest", "arr", "-p", "products.json", "-l", "2"]));

    let suggestions = value["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 2);
    assert!(suggestions[0]["name"].as_str().unwrap().starts_with("Arroz"));
}

#[test]
fn test_suggest_needs_two_characters() {
    let fx = Fixture::new();
    let value = json_stdout(fx.cmd().args(["--format", "json", "suggest", "a", "-p", "products.json"]));

    assert!(value["suggestions"].as_array().unwrap().is_empty());
}

#[test]
fn test_edit_distance_mode() {
    let fx = Fixture::new();
    let value = json_stdout(fx.cmd().args([
        "--format",
        "json",
        "search",
        "cafe pilao",
        "-p",
        "products.json",
        "--fuzzy",
        "edit-distance",
    ]));

    assert_eq!(ids(&value["items"]), vec!["2002"]);
}

#[test]
fn test_config_show() {
    let fx = Fixture::new();
    let value = json_stdout(fx.cmd().args(["--format", "json", "config"]));

    assert!(value["path"].is_null());
    assert_eq!(value["settings"]["pagination"]["default_page_size"], 24);
    assert!(value["client"]["base_url"].is_string());
}

#[test]
fn test_fetch_degrades_when_unreachable() {
    let fx = Fixture::new();
    let value = json_stdout(
        fx.cmd()
            .env("STOREFRONT_ENV", "development")
            .args(["--format", "json", "fetch", "--base-url", "http://127.0.0.1:9"]),
    );

    assert_eq!(value["products"]["status"], "degraded");
    assert_eq!(value["best_sellers"]["status"], "degraded");
    assert_eq!(value["promotions"]["status"], "degraded");
}

#[test]
fn test_metrics_flag() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["--metrics", "search", "arroz", "-p", "products.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("search.queries"));
}
