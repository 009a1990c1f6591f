//! Core classes and modules every Ruby program starts with.
//!
//! Declared classes and modules are linearized on top of these, so a project
//! class without an explicit superclass still ends in
//! `Object, Kernel, BasicObject`.

/// `(name, is_class, superclass, included modules)`
pub(super) const CORE_PRELUDE: &[(&str, bool, Option<&str>, &[&str])] = &[
    ("BasicObject", true, None, &[]),
    ("Kernel", false, None, &[]),
    ("Comparable", false, None, &[]),
    ("Enumerable", false, None, &[]),
    ("Object", true, Some("BasicObject"), &["Kernel"]),
    ("Module", true, Some("Object"), &[]),
    ("Class", true, Some("Module"), &[]),
    ("Numeric", true, Some("Object"), &["Comparable"]),
    ("Integer", true, Some("Numeric"), &[]),
    ("Float", true, Some("Numeric"), &[]),
    ("String", true, Some("Object"), &["Comparable"]),
    ("Symbol", true, Some("Object"), &["Comparable"]),
    ("Array", true, Some("Object"), &["Enumerable"]),
    ("Hash", true, Some("Object"), &["Enumerable"]),
    ("Exception", true, Some("Object"), &[]),
    ("StandardError", true, Some("Exception"), &[]),
];
