//! The accessor must fail fatally when bootstrap never ran.
//!
//! This lives in its own integration-test binary so no other test can have
//! bound the process-wide slot first.

#[test]
#[should_panic(expected = "host bridge was never bound")]
fn accessor_panics_without_binding() {
    let _ = spyglass_ui_core::host_bridge();
}
