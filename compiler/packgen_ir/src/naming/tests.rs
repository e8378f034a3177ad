#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn allocates_padded_sequence() {
    let mut names = NamingContext::default();
    assert_eq!(names.allocate().unwrap(), "za0001");
    assert_eq!(names.allocate().unwrap(), "za0002");
    assert_eq!(names.allocated(), 2);
}

#[test]
fn reset_restarts_counter_with_new_prefix() {
    let mut names = NamingContext::default();
    names.allocate().unwrap();
    names.allocate().unwrap();

    names.reset("zb");
    assert_eq!(names.prefix(), "zb");
    assert_eq!(names.allocated(), 0);
    assert_eq!(names.allocate().unwrap(), "zb0001");
}

#[test]
fn reset_keeps_configured_width() {
    let mut names = NamingContext::new(NamingConfig::default().with_width(2));
    names.reset("i");
    assert_eq!(names.allocate().unwrap(), "i01");
}

#[test]
fn counter_outgrows_width() {
    let mut names = NamingContext::new(NamingConfig::default().with_prefix("k").with_width(1));
    for _ in 0..9 {
        names.allocate().unwrap();
    }
    assert_eq!(names.allocate().unwrap(), "k10");
}

#[test]
fn counter_overflow_is_an_error() {
    let mut names = NamingContext::default();
    names.next = u32::MAX;
    assert_eq!(
        names.allocate(),
        Err(NamingError::CounterOverflow {
            prefix: "za".to_string()
        })
    );
}

#[test]
fn allocate_until_skips_rejected() {
    let mut names = NamingContext::default();
    let got = names
        .allocate_until(5, |candidate| candidate != "za0001" && candidate != "za0002")
        .unwrap();
    assert_eq!(got, "za0003");
}

#[test]
fn allocate_until_gives_up() {
    let mut names = NamingContext::default();
    let err = names.allocate_until(3, |_| false).unwrap_err();
    assert_eq!(
        err,
        NamingError::Exhausted {
            prefix: "za".to_string(),
            attempts: 3
        }
    );
    assert_eq!(
        err.to_string(),
        "no collision-free identifier with prefix `za` after 3 attempts"
    );
}

#[test]
fn independent_contexts_do_not_interfere() {
    let mut a = NamingContext::default();
    let mut b = NamingContext::default();
    assert_eq!(a.allocate().unwrap(), "za0001");
    assert_eq!(a.allocate().unwrap(), "za0002");
    assert_eq!(b.allocate().unwrap(), "za0001");
}
