use super::*;

#[test]
fn device_status_wire_values_roundtrip() {
    for status in DeviceStatus::ALL {
        assert_eq!(DeviceStatus::parse(status.as_str()), status);
    }
}

#[test]
fn unrecognized_status_falls_back_to_pending() {
    assert_eq!(
        DeviceStatus::parse("scrapped"),
        DeviceStatus::PendingAnalysis
    );
}

#[test]
fn unknown_stored_status_does_not_fail_the_table_load() {
    let raw = r#"[{
        "id": "d1",
        "customer_id": "c1",
        "type": "Notebook",
        "brand": "Dell",
        "model": "XPS 13",
        "status": "scrapped"
    }]"#;
    let rows: Vec<Device> = serde_json_wasm::from_str(raw).expect("row with unknown status");
    assert_eq!(rows[0].status, DeviceStatus::PendingAnalysis);
}

#[test]
fn device_status_serializes_to_wire_values() {
    let json = serde_json_wasm::to_string(&DeviceStatus::WaitingParts).expect("serialize status");
    assert_eq!(json, "\"waiting_parts\"");
}

#[test]
fn device_status_labels_are_localized() {
    assert_eq!(DeviceStatus::PendingAnalysis.label(), "Aguardando Análise");
    assert_eq!(DeviceStatus::Delivered.label(), "Entregue");
}

fn sample_device() -> Device {
    Device {
        id: "d1".to_string(),
        created_at: None,
        customer_id: "c1".to_string(),
        device_type: "Notebook".to_string(),
        brand: "Dell".to_string(),
        model: "Inspiron 15".to_string(),
        serial_number: Some("SN-0042".to_string()),
        status: DeviceStatus::InRepair,
        reported_issues: None,
        technical_notes: None,
        customer: Some(CustomerRef {
            name: "João Silva".to_string(),
            phone: None,
        }),
    }
}

#[test]
fn device_search_matches_brand_model_serial_and_customer() {
    let device = sample_device();
    assert!(device.matches("dell"));
    assert!(device.matches("inspiron"));
    assert!(device.matches("sn-0042"));
    assert!(device.matches("joão"));
    assert!(!device.matches("macbook"));
}

#[test]
fn empty_search_term_matches_everything() {
    assert!(sample_device().matches(""));
}

#[test]
fn customer_search_matches_name_email_and_phone() {
    let customer = Customer {
        id: "c1".to_string(),
        created_at: None,
        name: "Maria Santos".to_string(),
        email: Some("maria@example.com".to_string()),
        phone: Some("11 98765-4321".to_string()),
        address: None,
    };
    assert!(customer.matches("maria"));
    assert!(customer.matches("EXAMPLE.COM"));
    assert!(customer.matches("98765"));
    assert!(!customer.matches("joão"));
}
