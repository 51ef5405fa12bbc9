//! Embedded library file.
//!
//! The library is parsed into the program arena ahead of user files and bound
//! as a script, so its declarations land in the global table with
//! `Symbol::is_lib` set.

/// File name the library is registered under.
pub const LIB_FILE_NAME: &str = "lib.flowgen.d.ts";

/// Source of the library declarations.
pub const LIB_SOURCE: &str = include_str!("lib/lib.flowgen.d.ts");

/// Names declared by the library that have a Flow utility counterpart.
pub const UTILITY_TYPE_NAMES: &[&str] = &[
    "NonNullable",
    "Omit",
    "Parameters",
    "Partial",
    "Readonly",
    "ReadonlyArray",
    "ReadonlyMap",
    "ReadonlySet",
    "Record",
    "RegExpMatchArray",
    "ReturnType",
];

pub fn is_utility_type_name(name: &str) -> bool {
    UTILITY_TYPE_NAMES.binary_search(&name).is_ok()
}

pub fn is_lib_file_name(file_name: &str) -> bool {
    file_name == LIB_FILE_NAME
}
