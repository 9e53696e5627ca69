use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Result};
use csv::ReaderBuilder;
use serde_json::Value;
use tempfile::tempdir;

const BINARY_PATH: &str = env!("CARGO_BIN_EXE_pick-ticket-engine");

#[test]
fn test_cli_exports_order_as_pick_ticket() -> Result<()> {
    let sample_path = Path::new("samples").join("order.json");

    let output = Command::new(BINARY_PATH)
        .arg("export")
        .arg(sample_path)
        .output()?;

    assert!(output.status.success());

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(output.stdout.as_slice());
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].len(), 62);
    assert_eq!(&records[0][0], "PTH");
    assert_eq!(&records[0][2], "C2001");
    assert_eq!(&records[0][5], "03/05/2024");
    assert_eq!(&records[0][12], "Doe, Jane");
    assert_eq!(&records[0][24], "62704");

    for record in &records[1..] {
        assert_eq!(record.len(), 27);
        assert_eq!(&record[0], "PTD");
    }

    assert_eq!(&records[1][3], "1");
    assert_eq!(&records[1][10], "5");
    assert_eq!(&records[1][11], "5");
    assert_eq!(&records[2][3], "2");
    assert_eq!(&records[2][5], "TEAPOT-01");

    Ok(())
}

#[test]
fn test_cli_inspects_grouped_orders() -> Result<()> {
    let sample_path = Path::new("samples").join("tickets.csv");

    let output = Command::new(BINARY_PATH)
        .arg("inspect")
        .arg(sample_path)
        .output()?;

    assert!(output.status.success());

    let orders: Value = serde_json::from_slice(&output.stdout)?;
    let orders = orders.as_array().ok_or_else(|| anyhow!("Expected an array of orders"))?;

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["orderNumber"], "1001");
    assert_eq!(orders[0]["customer"]["name"], "Doe, Jane");
    assert_eq!(orders[0]["products"][0]["sku"], "MUG-RED");
    assert_eq!(orders[0]["products"][1]["sku"], "MUG-BLUE");
    assert_eq!(orders[1]["orderNumber"], "1002");
    assert_eq!(orders[1]["shippingMethod"], "FEDEX2DAY");

    Ok(())
}

#[test]
fn test_cli_imports_and_delivers_pick_tickets() -> Result<()> {
    let outbox = tempdir()?;
    let sample_path = Path::new("samples").join("tickets.csv");
    let catalog_path = Path::new("samples").join("catalog.csv");

    let output = Command::new(BINARY_PATH)
        .arg("import")
        .arg(&sample_path)
        .env("PICK_TICKET_OUTBOX", outbox.path())
        .env("PICK_TICKET_TARGET", "orders")
        .env("PICK_TICKET_CATALOG", catalog_path)
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("orders,line_items,resolved_names,rejected,remote_path"));

    let report = lines.next().ok_or_else(|| anyhow!("Report line missing from output"))?;
    let fields: Vec<&str> = report.split(',').collect();

    assert_eq!(fields[..4], ["2", "3", "3", ""]);
    assert!(fields[4].starts_with("/orders/PT_WSI_"));

    let delivered = fs::read_to_string(outbox.path().join(fields[4].trim_start_matches('/')))?;
    let lines: Vec<&str> = delivered.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("PTH,I,C1001,1001,"));
    assert!(lines[1].starts_with("PTD,I,C1001,1,A,MUG-RED,"));
    assert!(lines[2].starts_with("PTD,I,C1001,2,A,MUG-BLUE,"));
    assert!(lines[3].starts_with("PTH,I,C1002,1002,"));

    Ok(())
}

#[test]
fn test_cli_reports_tickets_it_could_not_rebuild() -> Result<()> {
    let outbox = tempdir()?;
    let workspace = tempdir()?;
    let input_path = workspace.path().join("tickets.csv");

    let tickets = fs::read_to_string(Path::new("samples").join("tickets.csv"))?;
    fs::write(&input_path, tickets.replace(",9.75,", ",,"))?;

    let output = Command::new(BINARY_PATH)
        .arg("import")
        .arg(&input_path)
        .env("PICK_TICKET_OUTBOX", outbox.path())
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let report = stdout.lines().nth(1).ok_or_else(|| anyhow!("Report line missing from output"))?;
    let fields: Vec<&str> = report.split(',').collect();

    assert_eq!(fields[..4], ["1", "1", "0", "C1001"]);
    assert!(String::from_utf8(output.stderr)?.contains("C1001"));

    let delivered = fs::read_to_string(outbox.path().join(fields[4].trim_start_matches('/')))?;

    assert!(delivered.starts_with("PTH,I,C1002,1002,"));
    assert_eq!(delivered.lines().count(), 2);

    Ok(())
}

#[test]
fn test_cli_rejects_order_with_missing_key() -> Result<()> {
    let outbox = tempdir()?;
    let sample_path = Path::new("samples").join("order_missing_shipping.json");

    let output = Command::new(BINARY_PATH)
        .arg("submit")
        .arg(sample_path)
        .env("PICK_TICKET_OUTBOX", outbox.path())
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("shippingMethod"));
    assert_eq!(fs::read_dir(outbox.path())?.count(), 0);

    Ok(())
}

#[test]
fn test_cli_prints_usage_for_unknown_command() -> Result<()> {
    let output = Command::new(BINARY_PATH)
        .arg("launch")
        .arg("samples/order.json")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)?.starts_with("Usage:"));

    Ok(())
}
