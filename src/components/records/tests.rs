use super::*;

#[test]
fn older_reload_is_superseded_by_a_newer_one() {
    let counter = AtomicU64::new(0);

    let first = next_generation(&counter);
    assert!(!superseded(&counter, first));

    // 第二轮重载发起后，第一轮的结果必须被丢弃
    let second = next_generation(&counter);
    assert!(superseded(&counter, first));
    assert!(!superseded(&counter, second));
}

#[test]
fn generations_are_strictly_increasing() {
    let counter = AtomicU64::new(0);
    let a = next_generation(&counter);
    let b = next_generation(&counter);
    let c = next_generation(&counter);
    assert!(a < b && b < c);
}
