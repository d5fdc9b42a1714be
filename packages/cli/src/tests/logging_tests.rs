use crate::logging;

#[test]
fn test_second_init_reports_existing_subscriber() {
    // Whatever the first call returns, a subscriber is installed afterwards
    logging::init("debug");

    assert!(!logging::init("info"));
    assert!(!logging::init("not a [valid filter"));
}
