//! Contact tracing end to end on a small inline ping log.

use cotrace::{
    addresses_for, dispatch_alerts, find_contacts, ClusterLabel, GeoDbscan, LocationRecord,
    ProximityClustering, SendError,
};

fn ping(identity: &str, meters_north: f64, meters_east: f64) -> LocationRecord {
    let meter_deg = 1.0 / 111_320.0;
    LocationRecord {
        identity: identity.to_string(),
        latitude: 12.9716 + meters_north * meter_deg,
        longitude: 77.5946 + meters_east * meter_deg,
        address: format!("{}@example.com", identity.to_lowercase()),
    }
}

fn main() {
    // A checkout queue, a nearby table, and one person across the street.
    let records = vec![
        ping("Alice", 0.0, 0.0),
        ping("Bob", 1.0, 0.0),
        ping("Carol", 0.0, 1.0),
        ping("Alice", 40.0, 40.0),
        ping("Dave", 41.0, 40.0),
        ping("Erin", 300.0, 300.0),
    ];

    // --- Clustering ---
    let engine = GeoDbscan::default();
    let points: Vec<_> = records.iter().map(|r| r.point()).collect();
    let labels = engine.cluster(&points).unwrap();
    println!("=== Density groups (6 ft radius) ===");
    for (record, label) in records.iter().zip(&labels) {
        let tag = match label {
            ClusterLabel::Group(id) => format!("group {id}"),
            ClusterLabel::Noise => "noise".to_string(),
        };
        println!("  {:5} at ({:.6}, {:.6}) => {}", record.identity, record.latitude, record.longitude, tag);
    }

    // --- Contact resolution ---
    let contacts = find_contacts(&records, &engine, "Alice").unwrap();
    println!("\n=== Contacts of Alice ===");
    println!("  {}", contacts.join(", "));

    // --- Dispatch through a stand-in channel ---
    let mut channel = |address: &str, subject: &str, _body: &str| -> Result<(), SendError> {
        println!("  -> {address}: {subject}");
        Ok(())
    };
    let addresses = addresses_for(&records, &contacts);
    println!("\n=== Alerts ===");
    let results = dispatch_alerts(&mut channel, &addresses, "Alice");
    let sent = results.iter().filter(|r| r.is_sent()).count();
    println!("  {sent} of {} alerts sent", results.len());
}
