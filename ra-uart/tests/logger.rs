use ra_uart::logger::{drain_logs, init_logger};

#[test]
fn logged_records_are_drained_in_order() {
    init_logger(log::LevelFilter::Info, || 7);
    log::info!("first");
    log::debug!("filtered out");
    log::warn!("second");

    let mut buf = [0u8; 512];
    let mut out = &mut buf[..];
    let written = drain_logs(&mut out);
    let remaining = out.len();
    let text = core::str::from_utf8(&buf[..512 - remaining]).unwrap();

    assert_eq!(written, 2);
    let first = text.find("INFO [7] - first").unwrap();
    let second = text.find("WARN [7] - second").unwrap();
    assert!(first < second);
    assert!(!text.contains("filtered out"));

    let mut empty = [0u8; 8];
    assert_eq!(drain_logs(&mut &mut empty[..]), 0);
}
