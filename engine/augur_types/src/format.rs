//! Type formatting for error messages and debugging.

#![allow(clippy::format_push_string)] // Error formatting prioritizes clarity over allocation

use crate::{Idx, Pool, TyKind};

impl Pool {
    /// Format a type as a human-readable string.
    ///
    /// Resolves first, then stringifies recursively. Unbound variables are
    /// given display names lazily from the pool's rotating `a, b, c, …`
    /// sequence; a variable keeps its name across renders. Functions render
    /// infix, tuples parenthesized and comma-joined, lists bracketed.
    pub fn display(&mut self, idx: Idx) -> String {
        let mut buf = String::new();
        self.display_into(idx, &mut buf, false);
        buf
    }

    /// Format a type into an existing string buffer.
    ///
    /// `nested` requests parentheses around types that would otherwise be
    /// ambiguous in argument position (functions, bare applications).
    fn display_into(&mut self, idx: Idx, buf: &mut String, nested: bool) {
        let idx = self.resolve(idx);
        let builtins = self.builtins();
        match self.kind(idx).clone() {
            TyKind::Var(var_id) => {
                let slot = self.display_slot(var_id);
                buf.push_str(&slot_name(slot));
            }
            TyKind::Con(name) => {
                buf.push_str(self.interner().lookup(name));
            }
            TyKind::App { head, args } => {
                let head_name = self.head_name(head);
                if head_name == Some(builtins.arrow) && args.len() == 2 {
                    if nested {
                        buf.push('(');
                    }
                    // Left side of an arrow parenthesizes nested arrows.
                    self.display_into(args[0], buf, true);
                    buf.push_str(" -> ");
                    self.display_into(args[1], buf, false);
                    if nested {
                        buf.push(')');
                    }
                } else if head_name == Some(builtins.tuple) {
                    buf.push('(');
                    for (i, &arg) in args.iter().enumerate() {
                        if i > 0 {
                            buf.push_str(", ");
                        }
                        self.display_into(arg, buf, false);
                    }
                    buf.push(')');
                } else if head_name == Some(builtins.list) && args.len() == 1 {
                    buf.push('[');
                    self.display_into(args[0], buf, false);
                    buf.push(']');
                } else {
                    if nested {
                        buf.push('(');
                    }
                    self.display_into(head, buf, true);
                    for &arg in &args {
                        buf.push(' ');
                        self.display_into(arg, buf, true);
                    }
                    if nested {
                        buf.push(')');
                    }
                }
            }
        }
    }
}

/// Name for a display slot: `a, b, …, z, a1, b1, …`.
fn slot_name(slot: u32) -> String {
    let letter = char::from(b'a' + u8::try_from(slot % 26).unwrap_or(0));
    let round = slot / 26;
    if round == 0 {
        letter.to_string()
    } else {
        format!("{letter}{round}")
    }
}

#[cfg(test)]
mod tests {
    use crate::Pool;
    use augur_ir::SharedInterner;

    fn pool() -> Pool {
        Pool::new(SharedInterner::new())
    }

    #[test]
    fn scalars_render_by_name() {
        let mut pool = pool();
        let int = pool.con(pool.builtins().int);
        assert_eq!(pool.display(int), "int");
    }

    #[test]
    fn functions_render_infix() {
        let mut pool = pool();
        let int = pool.con(pool.builtins().int);
        let string = pool.con(pool.builtins().string);
        let f = pool.function(int, string);
        assert_eq!(pool.display(f), "int -> str");
    }

    #[test]
    fn nested_function_parenthesizes_left() {
        let mut pool = pool();
        let int = pool.con(pool.builtins().int);
        let inner = pool.function(int, int);
        let outer = pool.function(inner, int);
        assert_eq!(pool.display(outer), "(int -> int) -> int");
    }

    #[test]
    fn curried_function_keeps_right_flat() {
        let mut pool = pool();
        let int = pool.con(pool.builtins().int);
        let inner = pool.function(int, int);
        let outer = pool.function(int, inner);
        assert_eq!(pool.display(outer), "int -> int -> int");
    }

    #[test]
    fn tuples_and_lists() {
        let mut pool = pool();
        let int = pool.con(pool.builtins().int);
        let boolean = pool.con(pool.builtins().boolean);
        let tup = pool.tuple(vec![int, boolean]);
        assert_eq!(pool.display(tup), "(int, bool)");
        let list = pool.list(tup);
        assert_eq!(pool.display(list), "[(int, bool)]");
    }

    #[test]
    fn variables_get_stable_lazy_names() {
        let mut pool = pool();
        let v1 = pool.fresh_var();
        let v2 = pool.fresh_var();
        let f = pool.function(v2, v1);
        // v2 is rendered first, so it takes the first letter.
        assert_eq!(pool.display(f), "a -> b");
        // Names stay stable on re-render.
        assert_eq!(pool.display(v1), "b");
        assert_eq!(pool.display(v2), "a");
    }

    #[test]
    fn user_constructor_application() {
        let mut pool = pool();
        let maybe = pool.interner().intern("Maybe");
        let head = pool.con(maybe);
        let int = pool.con(pool.builtins().int);
        let app = pool.app(head, vec![int]);
        assert_eq!(pool.display(app), "Maybe int");
    }

    #[test]
    fn display_slots_rotate_past_z() {
        assert_eq!(super::slot_name(0), "a");
        assert_eq!(super::slot_name(25), "z");
        assert_eq!(super::slot_name(26), "a1");
        assert_eq!(super::slot_name(27), "b1");
    }
}
