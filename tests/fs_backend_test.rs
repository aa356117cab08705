use chrono::Utc;
use prodcat::error::CatalogError;
use prodcat::model::{Product, ProductFormData};
use prodcat::store::backend::CatalogBackend;
use prodcat::store::catalog::CatalogStore;
use prodcat::store::fs_backend::FsBackend;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("products.json"));
    (dir, backend)
}

fn form(name: &str) -> ProductFormData {
    ProductFormData::new(
        name,
        format!("{} description", name),
        format!("How to use {}", name),
        format!("https://example.com/{}", name.to_lowercase()),
    )
}

fn product(id: &str, name: &str) -> Product {
    Product::from_form(id.to_string(), &form(name), Utc::now())
}

#[test]
fn test_fs_backend_missing_file_is_empty_catalog() {
    let (_dir, backend) = setup();
    assert!(backend.fetch_all().unwrap().is_empty());
}

#[test]
fn test_fs_backend_changes_survive_new_instance() {
    let (dir, backend) = setup();

    backend.insert(&product("a", "Lamp")).unwrap();
    backend.insert(&product("b", "Desk")).unwrap();
    let updated = backend.update("a", &form("Floor Lamp"), Utc::now()).unwrap();
    assert_eq!(updated.map(|p| p.name), Some("Floor Lamp".to_string()));
    backend.remove("b").unwrap();

    let reopened = FsBackend::new(dir.path().join("products.json"));
    let products = reopened.fetch_all().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "a");
    assert_eq!(products[0].name, "Floor Lamp");
}

#[test]
fn test_fs_backend_update_unknown_id_is_none() {
    let (_dir, backend) = setup();
    backend.insert(&product("a", "Lamp")).unwrap();

    let result = backend.update("missing", &form("Other"), Utc::now()).unwrap();
    assert!(result.is_none());
    assert_eq!(backend.fetch_all().unwrap()[0].name, "Lamp");
}

#[test]
fn test_fs_backend_replace_all_overwrites() {
    let (_dir, backend) = setup();
    backend.insert(&product("old", "Old")).unwrap();

    backend
        .replace_all(&[product("x", "X"), product("y", "Y")])
        .unwrap();

    let ids: Vec<_> = backend
        .fetch_all()
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["x", "y"]);
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (dir, backend) = setup();
    backend.insert(&product("a", "Lamp")).unwrap();

    let on_disk = fs::read_to_string(dir.path().join("products.json")).unwrap();
    assert!(on_disk.contains("\n  {"), "expected pretty JSON: {}", on_disk);
    assert!(on_disk.contains("\"usageInstructions\""));
    assert!(on_disk.contains("\"externalLink\""));

    // Verify NO .tmp files are left behind
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let nested: PathBuf = dir.path().join("deep").join("er").join("products.json");
    let backend = FsBackend::new(&nested);

    backend.insert(&product("a", "Lamp")).unwrap();
    assert!(nested.exists());
}

#[test]
fn test_fs_backend_corrupt_file_is_serialization_error() {
    let (dir, backend) = setup();
    fs::write(dir.path().join("products.json"), "{ not json").unwrap();

    assert!(matches!(
        backend.fetch_all(),
        Err(CatalogError::Serialization(_))
    ));
}

#[test]
fn test_store_over_fs_backend_reopens_with_same_data() {
    let (dir, backend) = setup();
    let path = backend.data_file().to_path_buf();

    let mut store = CatalogStore::open(backend, 10).unwrap();
    let added = store.add(form("Lamp")).unwrap().unwrap();
    store.add(form("Desk")).unwrap();
    store.update(&added.id, form("Floor Lamp")).unwrap();
    drop(store);

    let store = CatalogStore::open(FsBackend::new(&path), 10).unwrap();
    assert_eq!(store.len(), 2);
    let reloaded = store.get_by_id(&added.id).unwrap();
    assert_eq!(reloaded.name, "Floor Lamp");
    assert_eq!(reloaded.created_at, added.created_at);
    drop(dir);
}

#[test]
fn test_store_over_fs_backend_truncates_oversized_file() {
    let (_dir, backend) = setup();
    backend
        .replace_all(&[product("a", "A"), product("b", "B"), product("c", "C")])
        .unwrap();

    let store = CatalogStore::open(backend, 2).unwrap();
    assert_eq!(store.len(), 2);
    assert!(!store.can_add_more());
}

#[test]
fn test_store_over_fs_backend_keeps_adds_after_truncated_open() {
    let (_dir, backend) = setup();
    let path = backend.data_file().to_path_buf();
    let oversized: Vec<Product> = (0..5)
        .map(|i| product(&format!("p{}", i), &format!("Item {}", i)))
        .collect();
    backend.replace_all(&oversized).unwrap();

    let mut store = CatalogStore::open(backend, 3).unwrap();
    assert_eq!(FsBackend::new(&path).fetch_all().unwrap().len(), 3);

    store.delete("p0").unwrap();
    let added = store.add(form("New")).unwrap().unwrap();
    let ids: Vec<String> = store.list().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec!["p1".to_string(), "p2".to_string(), added.id.clone()]);
    drop(store);

    let reopened = CatalogStore::open(FsBackend::new(&path), 3).unwrap();
    let reopened_ids: Vec<String> = reopened.list().iter().map(|p| p.id.clone()).collect();
    assert_eq!(reopened_ids, ids);
    assert!(reopened.get_by_id("p3").is_none());
}
