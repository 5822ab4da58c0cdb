//! Hosted tour of the pipeline: log through the capture port, then show
//! what would have gone over the wire and what the offline decoder would
//! read back out of the binary.
//!
//! ```text
//! cargo run --example hosted --features std
//! ```

use ulog::callsite;
use ulog::ports::hosted::CapturePort;

static LOGGER: ulog::Engine<CapturePort, { ulog::DEFAULT_QUEUE_SIZE }> = ulog::Engine::new();

fn main() {
    LOGGER.init().expect("first engine in this process");

    let temperature = 36.7f32;
    let retries = 3u8;

    ulog::mile!("power-on self test passed");
    ulog::info!("temperature {=f32} C", temperature);
    ulog::warn!("retries {=u8}, fallback {=bool}", retries, true);
    ulog::info!("peer {=str} at {=u16}", "node-a", 0x1234u16);
    ulog::error!("bus fault at {=u32}", 0xDEAD_BEEFu32);

    ulog::flush();

    println!("wire frames (sentinel-terminated):");
    for frame in CapturePort::take_frames() {
        print!("  ");
        for byte in &frame {
            print!("{:02X} ", byte);
        }
        println!();
    }

    println!();
    println!("metadata region ({} records):", callsite::callsites().len());
    for record in callsite::callsites() {
        let level = match record.level() {
            Some(level) => level.name(),
            None => "?",
        };
        println!(
            "  id {:04X}  {:6}  {}:{}  \"{}\"  typecode {:08X}",
            callsite::callsite_id(record),
            level,
            record.file(),
            record.line(),
            record.fmt_str(),
            record.typecode(),
        );
    }
}
