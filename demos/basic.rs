/* demos/basic.rs */

use holdfast::controller::DurableStore;
use holdfast::holder::StoreEvent;
use std::fs;
use std::thread::sleep;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 0. Start from a clean directory
	let base_dir = std::env::temp_dir().join("holdfast-demo");
	if base_dir.exists() {
		fs::remove_dir_all(&base_dir)?;
	}

	// 1. Open the store; the file does not exist yet so it starts empty
	let settings = DurableStore::builder()
		.base_dir(&base_dir)
		.file_name("settings.json")
		.save_interval(Duration::from_secs(1))
		.poll_interval(Duration::from_millis(100))
		.build()?;
	println!("Opened {:?} ({} keys)", settings.path(), settings.len());

	// 2. Observe changes
	settings.subscribe(|event| match event {
		StoreEvent::Changed { key } => println!("  changed: {}", key),
		StoreEvent::Removed { key } => println!("  removed: {}", key),
	});

	// 3. Typed writes and reads
	settings.set_as_string("name", "holdfast-demo")?;
	settings.set_as_int("port", "8080")?;
	settings.set("verbose", "no");
	println!(
		"name={:?} port={:?} verbose={:?}",
		settings.get_as_string("name", None),
		settings.get_as_int("port", None),
		settings.get_as_boolean("verbose", Some(true)),
	);

	// 4. Nested settings write through to the parent
	if let Some(network) = settings.get_as_sub_store("network", None) {
		network.set("timeout_ms", 2500);
		network.set("retries", 3);
	}

	// 5. Wait for the debounced save
	println!("Waiting for the save interval...");
	sleep(Duration::from_millis(1500));
	println!("On disk:\n{}", fs::read_to_string(settings.path())?);

	// 6. Keep only the port, add a marker, save immediately
	settings.backup_and_setup(&["port"], [("migrated", true)]);
	println!("After reset:\n{}", fs::read_to_string(settings.path())?);

	// 7. A pending change is flushed on shutdown
	settings.set("last_words", "goodbye");
	settings.shutdown();
	println!("After shutdown:\n{}", fs::read_to_string(settings.path())?);

	// Cleanup
	drop(settings);
	fs::remove_dir_all(&base_dir)?;
	println!("Done.");
	Ok(())
}
