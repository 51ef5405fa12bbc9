//! Flow type helpers prepended to output that needs them.

/// Emulates TypeScript conditional types with `$Call` overload selection.
/// Emitted once per file, only when a conditional type was printed.
pub const CONDITIONAL_HELPERS: &str = "\
// see https://gist.github.com/thecotne/6e5969f4aaf8f253985ed36b30ac9fe0
type $FlowGen$If<X: boolean, Then, Else = empty> = $Call<
  & ((true, Then, Else) => Then)
  & ((false, Then, Else) => Else),
  X,
  Then,
  Else,
>;

type $FlowGen$Assignable<A, B> = $Call<
  & ((...r: [B]) => true)
  & ((...r: [A]) => false),
  A,
>;";

/// First line of output when the flow header is requested.
pub const FLOW_HEADER: &str = "// @flow";
