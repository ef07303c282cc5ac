//! # Startup Fixtures
//!
//! Seeds the store on launch, either from a snapshot file or from the
//! built-in demo data.
//!
//! ## Demo Data
//! A small glazing workshop:
//! - 5 stock items across profiles, glass, fasteners and sealants
//! - 3 users (one administrator)
//! - 3 suppliers
//! - one entry and one exit of history on the first item

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use stockroom_core::{
    AuditLog, HistoryEntry, Profile, Snapshot, StockItem, Supplier, User, AVATAR_BASE_URL,
};
use tracing::info;

use crate::error::ApiError;

/// (id, code, description, unit, stock, min, suppliers)
const ITEMS: &[(&str, &str, &str, &str, i64, i64, &[&str])] = &[
    ("it-1", "AL-001", "Aluminium profile 6m", "bar", 120, 40, &["Alcoa Metals", "Hydro Extrusions"]),
    ("it-2", "VD-008", "Tempered glass 8mm", "m2", 18, 20, &["Cristal Glassworks"]),
    ("it-3", "PF-440", "Stainless screw 4x40", "box", 75, 10, &["Fixa Fasteners"]),
    ("it-4", "SL-300", "Neutral silicone 300ml", "tube", 6, 12, &[]),
    ("it-5", "BR-025", "EPDM gasket 25m", "roll", 30, 8, &["Hydro Extrusions"]),
];

/// (id, name, email, profile)
const USERS: &[(i64, &str, &str, Profile)] = &[
    (1, "Joana Prado", "joana.prado@stockroom.test", Profile::Administrator),
    (2, "Caio Mendes", "caio.mendes@stockroom.test", Profile::Operator),
    (3, "Lia Torres", "lia.torres@stockroom.test", Profile::Operator),
];

/// (id, name, contact, email, phone)
const SUPPLIERS: &[(i64, &str, &str, &str, &str)] = &[
    (101, "Alcoa Metals", "Marta Reis", "sales@alcoa.test", "555-0100"),
    (102, "Hydro Extrusions", "Paulo Dias", "orders@hydro.test", "555-0142"),
    (103, "Cristal Glassworks", "Rui Lopes", "rui@cristal.test", "555-0177"),
];

/// Built-in demo snapshot.
pub fn demo_snapshot() -> Snapshot {
    let stock_items = ITEMS
        .iter()
        .map(|(id, code, description, unit, stock, min, suppliers)| StockItem {
            id: id.to_string(),
            code: code.to_string(),
            description: description.to_string(),
            unit: unit.to_string(),
            system_stock: *stock,
            min_stock: *min,
            suppliers: suppliers.iter().map(|s| s.to_string()).collect(),
        })
        .collect();

    let users = USERS
        .iter()
        .map(|(id, name, email, profile)| User {
            id: *id,
            name: name.to_string(),
            email: email.to_string(),
            profile: *profile,
            avatar_url: format!("{AVATAR_BASE_URL}{email}"),
        })
        .collect();

    let suppliers = SUPPLIERS
        .iter()
        .map(|(id, name, contact, email, phone)| Supplier {
            id: *id,
            name: name.to_string(),
            contact: contact.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        })
        .collect();

    let mut history_data = BTreeMap::new();
    history_data.insert(
        "it-1".to_string(),
        vec![
            HistoryEntry::Exit {
                id: "h-demo-2".to_string(),
                date: demo_date(3),
                quantity: 20,
                user: "Caio Mendes".to_string(),
                requester: "Assembly line".to_string(),
                responsible: "Caio Mendes".to_string(),
            },
            HistoryEntry::Entry {
                id: "h-demo-1".to_string(),
                date: demo_date(1),
                quantity: 100,
                user: "Joana Prado".to_string(),
                details: "Supplier: Alcoa Metals. Invoice: NF-2291. Notes: N/A".to_string(),
            },
        ],
    );

    Snapshot {
        stock_items,
        users,
        suppliers,
        audit_logs: Vec::<AuditLog>::new(),
        history_data,
    }
}

fn demo_date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap_or_default()
}

/// Reads a snapshot file.
///
/// The file has the same shape as a backup document.
pub async fn load_fixtures(path: &Path) -> Result<Snapshot, ApiError> {
    let text = tokio::fs::read_to_string(path).await?;
    let snapshot: Snapshot = serde_json::from_str(&text).map_err(|e| {
        ApiError::new(
            crate::error::ErrorCode::InvalidBackup,
            format!("Fixture file {} is not a snapshot: {e}", path.display()),
        )
    })?;
    snapshot.validate().map_err(|e| {
        ApiError::new(
            crate::error::ErrorCode::InvalidBackup,
            format!("Fixture file {} is inconsistent: {e}", path.display()),
        )
    })?;

    info!(
        path = %path.display(),
        items = snapshot.stock_items.len(),
        users = snapshot.users.len(),
        "Fixtures loaded"
    );
    Ok(snapshot)
}

/// Fixture file if one is configured, demo data otherwise.
pub async fn initial_snapshot(path: Option<&Path>) -> Result<Snapshot, ApiError> {
    match path {
        Some(path) => load_fixtures(path).await,
        None => Ok(demo_snapshot()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_demo_snapshot_is_consistent() {
        let snapshot = demo_snapshot();
        assert!(snapshot.validate().is_ok());
        assert_eq!(snapshot.stock_items.len(), 5);
        assert!(snapshot.users.iter().any(|u| u.profile == Profile::Administrator));
        assert!(snapshot
            .history_data
            .keys()
            .all(|id| snapshot.stock_items.iter().any(|i| &i.id == id)));
    }

    #[tokio::test]
    async fn test_load_fixtures_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&demo_snapshot()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let snapshot = load_fixtures(file.path()).await.unwrap();
        assert_eq!(snapshot, demo_snapshot());
    }

    #[tokio::test]
    async fn test_load_fixtures_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"stockItems\": 3}").unwrap();

        let err = load_fixtures(file.path()).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidBackup);
    }

    #[tokio::test]
    async fn test_load_fixtures_rejects_negative_stock() {
        let mut snapshot = demo_snapshot();
        snapshot.stock_items[0].system_stock = -1;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&snapshot).unwrap().as_bytes())
            .unwrap();

        let err = load_fixtures(file.path()).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidBackup);
    }

    #[tokio::test]
    async fn test_missing_fixture_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = initial_snapshot(Some(dir.path().join("absent.json").as_path()))
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::IoError);
    }
}
