//! Recursion limits shared by the parser, binder and printer.

/// Maximum nesting of type syntax the parser descends into before reporting
/// `Type expected` and bailing out.
pub const MAX_PARSER_DEPTH: u32 = 1_000;

/// Maximum number of alias hops followed when resolving an import.
///
/// ```typescript
/// // a.ts
/// export { X } from "./b";
/// // b.ts
/// export { X } from "./a";
/// ```
pub const MAX_ALIAS_CHAIN: u32 = 64;

/// Maximum depth of the symbol qualifier's parent walk.
pub const MAX_QUALIFY_DEPTH: u32 = 128;

/// Stack headroom the printer and tree rewrites keep before growing the
/// stack for deeply nested nodes.
pub const PRINTER_STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment allocated when the stack grows.
pub const PRINTER_STACK_SEGMENT: usize = 1024 * 1024;
