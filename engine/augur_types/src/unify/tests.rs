#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use augur_ir::{Name, SharedInterner};
use pretty_assertions::assert_eq;

fn pool() -> Pool {
    Pool::new(SharedInterner::new())
}

#[test]
fn unify_identical_scalars() {
    let mut pool = pool();
    let int = pool.con(pool.builtins().int);
    let string = pool.con(pool.builtins().string);

    let mut engine = UnifyEngine::new(&mut pool);
    assert!(engine.unify(int, int).is_ok());
    assert!(engine.unify(string, string).is_ok());
}

#[test]
fn unify_different_scalars_fails() {
    let mut pool = pool();
    let int = pool.con(pool.builtins().int);
    let string = pool.con(pool.builtins().string);

    let mut engine = UnifyEngine::new(&mut pool);
    let result = engine.unify(int, string);
    assert!(matches!(result, Err(UnifyError::Mismatch { .. })));
}

#[test]
fn unify_variable_with_scalar() {
    let mut pool = pool();
    let int = pool.con(pool.builtins().int);
    let var = pool.fresh_var();

    let mut engine = UnifyEngine::new(&mut pool);
    assert!(engine.unify(var, int).is_ok());
    assert_eq!(pool.resolve(var), int);
}

#[test]
fn unify_two_variables() {
    let mut pool = pool();
    let boolean = pool.con(pool.builtins().boolean);
    let var1 = pool.fresh_var();
    let var2 = pool.fresh_var();

    let mut engine = UnifyEngine::new(&mut pool);
    assert!(engine.unify(var1, var2).is_ok());

    // Now unify one with a concrete type.
    assert!(engine.unify(var1, boolean).is_ok());

    // Both should resolve to bool.
    assert_eq!(pool.resolve(var1), boolean);
    assert_eq!(pool.resolve(var2), boolean);
}

#[test]
fn unify_is_symmetric() {
    let interner = SharedInterner::new();
    let mut left = Pool::new(interner.clone());
    let mut right = Pool::new(interner);

    // Same shapes built into two pools, unified in opposite orders.
    for (swap, pool) in [(false, &mut left), (true, &mut right)] {
        let int = pool.con(pool.builtins().int);
        let var = pool.fresh_var();
        let f1 = pool.function(var, int);
        let var2 = pool.fresh_var();
        let f2 = pool.function(int, var2);

        let mut engine = UnifyEngine::new(pool);
        let result = if swap {
            engine.unify(f2, f1)
        } else {
            engine.unify(f1, f2)
        };
        assert!(result.is_ok());
        assert_eq!(pool.display(f1), pool.display(f2));
        assert_eq!(pool.display(f1), "int -> int");
    }
}

#[test]
fn occurs_check_detects_infinite_type() {
    let mut pool = pool();
    let var = pool.fresh_var();
    let func = pool.function(var, var);

    let mut engine = UnifyEngine::new(&mut pool);
    let result = engine.unify(var, func);
    assert!(matches!(result, Err(UnifyError::InfiniteType { .. })));
}

#[test]
fn occurs_check_through_links() {
    let mut pool = pool();
    let var1 = pool.fresh_var();
    let var2 = pool.fresh_var();
    let list_of_var1 = pool.list(var1);

    let mut engine = UnifyEngine::new(&mut pool);
    assert!(engine.unify(var1, var2).is_ok());
    // var2 now stands for var1; [var1] contains var2 through the link.
    let result = engine.unify(var2, list_of_var1);
    assert!(matches!(result, Err(UnifyError::InfiniteType { .. })));
}

#[test]
fn unify_functions_positionally() {
    let mut pool = pool();
    let int = pool.con(pool.builtins().int);
    let string = pool.con(pool.builtins().string);
    let var1 = pool.fresh_var();
    let var2 = pool.fresh_var();
    let f1 = pool.function(var1, int);
    let f2 = pool.function(string, var2);

    let mut engine = UnifyEngine::new(&mut pool);
    assert!(engine.unify(f1, f2).is_ok());
    assert_eq!(pool.resolve(var1), string);
    assert_eq!(pool.resolve(var2), int);
}

#[test]
fn unify_function_against_scalar_fails() {
    let mut pool = pool();
    let int = pool.con(pool.builtins().int);
    let func = pool.function(int, int);

    let mut engine = UnifyEngine::new(&mut pool);
    let result = engine.unify(int, func);
    assert!(matches!(result, Err(UnifyError::Mismatch { .. })));
}

#[test]
fn unify_tuples_of_different_length_fails() {
    let mut pool = pool();
    let int = pool.con(pool.builtins().int);
    let t2 = pool.tuple(vec![int, int]);
    let t3 = pool.tuple(vec![int, int, int]);

    let mut engine = UnifyEngine::new(&mut pool);
    let result = engine.unify(t2, t3);
    assert!(matches!(result, Err(UnifyError::ArityMismatch { .. })));
}

#[test]
fn unify_lists() {
    let mut pool = pool();
    let int = pool.con(pool.builtins().int);
    let var = pool.fresh_var();
    let list_var = pool.list(var);
    let list_int = pool.list(int);

    let mut engine = UnifyEngine::new(&mut pool);
    assert!(engine.unify(list_var, list_int).is_ok());
    assert_eq!(pool.resolve(var), int);
}

#[test]
fn placeholder_head_adopts_constructor() {
    let mut pool = pool();
    let maybe = pool.interner().intern("Maybe");
    let int = pool.con(pool.builtins().int);

    // f a  ~  Maybe int
    let head_var = pool.fresh_var();
    let elem = pool.fresh_var();
    let hk = pool.app(head_var, vec![elem]);
    let maybe_head = pool.con(maybe);
    let maybe_int = pool.app(maybe_head, vec![int]);

    let mut engine = UnifyEngine::new(&mut pool);
    assert!(engine.unify(hk, maybe_int).is_ok());
    assert_eq!(pool.resolve(head_var), maybe_head);
    assert_eq!(pool.resolve(elem), int);
    assert_eq!(pool.display(hk), "Maybe int");
}

#[test]
fn placeholder_head_respects_arity() {
    let mut pool = pool();
    let either = pool.interner().intern("Either");
    let int = pool.con(pool.builtins().int);
    let string = pool.con(pool.builtins().string);

    // f a  ~  Either str int: refused, the placeholder is unary.
    let head_var = pool.fresh_var();
    let elem = pool.fresh_var();
    let hk = pool.app(head_var, vec![elem]);
    let either_head = pool.con(either);
    let either_ty = pool.app(either_head, vec![string, int]);

    let mut engine = UnifyEngine::new(&mut pool);
    let result = engine.unify(hk, either_ty);
    assert!(matches!(result, Err(UnifyError::ArityMismatch { .. })));
}

#[test]
fn constraint_union_is_symmetric() {
    let mut pool = pool();
    let eq = pool.interner().intern("Eq");
    let ord = pool.interner().intern("Ord");

    let v1 = pool.fresh_var_with(ConstraintSet::from_slice(&[eq]));
    let v2 = pool.fresh_var_with(ConstraintSet::from_slice(&[ord]));

    let mut engine = UnifyEngine::new(&mut pool);
    assert!(engine.unify(v1, v2).is_ok());

    let mut expected = ConstraintSet::from_slice(&[eq, ord]);
    expected.sort_unstable();
    assert_eq!(pool.constraints_of(v1), expected);
    assert_eq!(pool.constraints_of(v2), expected);
}

#[test]
fn constraint_union_is_idempotent() {
    let mut pool = pool();
    let eq = pool.interner().intern("Eq");

    let v1 = pool.fresh_var_with(ConstraintSet::from_slice(&[eq]));
    let v2 = pool.fresh_var_with(ConstraintSet::from_slice(&[eq]));

    let mut engine = UnifyEngine::new(&mut pool);
    assert!(engine.unify(v1, v2).is_ok());
    assert_eq!(pool.constraints_of(v2).as_slice(), &[eq]);
}

struct SingleInstance {
    class: Name,
    key: Name,
}

impl ClassEnv for SingleInstance {
    fn satisfies(&self, key: Name, class: Name) -> bool {
        key == self.key && class == self.class
    }
}

#[test]
fn constrained_binding_validated_against_classes() {
    let mut pool = pool();
    let num = pool.interner().intern("Num");
    let int = pool.con(pool.builtins().int);
    let string = pool.con(pool.builtins().string);
    let classes = SingleInstance {
        class: num,
        key: pool.builtins().int,
    };

    let good = pool.fresh_var_with(ConstraintSet::from_slice(&[num]));
    let bad = pool.fresh_var_with(ConstraintSet::from_slice(&[num]));

    let mut engine = UnifyEngine::with_classes(&mut pool, &classes);
    assert!(engine.unify(good, int).is_ok());

    let result = engine.unify(bad, string);
    assert!(matches!(
        result,
        Err(UnifyError::MissingInstance { class, .. }) if class == num
    ));
}

#[test]
fn unconstrained_engine_carries_constraints() {
    let mut pool = pool();
    let num = pool.interner().intern("Num");
    let string = pool.con(pool.builtins().string);

    let var = pool.fresh_var_with(ConstraintSet::from_slice(&[num]));

    // No registry attached: the binding is accepted and dispatch is left
    // to catch the missing instance.
    let mut engine = UnifyEngine::new(&mut pool);
    assert!(engine.unify(var, string).is_ok());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    /// Strategy: a small closed type shape plus a few free variables.
    fn shape() -> impl Strategy<Value = Shape> {
        let leaf = prop_oneof![
            Just(Shape::Int),
            Just(Shape::Bool),
            (0u8..3).prop_map(Shape::Var),
        ];
        leaf.prop_recursive(3, 12, 2, |inner| {
            prop_oneof![
                (inner.clone(), inner.clone()).prop_map(|(a, b)| Shape::Func(Box::new(a), Box::new(b))),
                inner.prop_map(|a| Shape::List(Box::new(a))),
            ]
        })
    }

    #[derive(Clone, Debug)]
    enum Shape {
        Int,
        Bool,
        Var(u8),
        Func(Box<Shape>, Box<Shape>),
        List(Box<Shape>),
    }

    fn build(pool: &mut Pool, shape: &Shape, vars: &mut [Option<Idx>; 3]) -> Idx {
        match shape {
            Shape::Int => pool.con(pool.builtins().int),
            Shape::Bool => pool.con(pool.builtins().boolean),
            Shape::Var(n) => {
                let slot = usize::from(*n) % vars.len();
                if let Some(idx) = vars[slot] {
                    idx
                } else {
                    let idx = pool.fresh_var();
                    vars[slot] = Some(idx);
                    idx
                }
            }
            Shape::Func(a, b) => {
                let a = build(pool, a, vars);
                let b = build(pool, b, vars);
                pool.function(a, b)
            }
            Shape::List(a) => {
                let a = build(pool, a, vars);
                pool.list(a)
            }
        }
    }

    proptest! {
        #[test]
        fn prune_is_idempotent(shape in shape()) {
            let mut pool = Pool::new(SharedInterner::new());
            let mut vars = [None; 3];
            let ty = build(&mut pool, &shape, &mut vars);
            let once = pool.resolve(ty);
            let twice = pool.resolve(once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn unify_succeeds_symmetrically(a in shape(), b in shape()) {
            let interner = SharedInterner::new();

            let mut forward_pool = Pool::new(interner.clone());
            let mut vars = [None; 3];
            let fa = build(&mut forward_pool, &a, &mut vars);
            let fb = build(&mut forward_pool, &b, &mut vars);
            let forward = UnifyEngine::new(&mut forward_pool).unify(fa, fb).is_ok();

            let mut backward_pool = Pool::new(interner);
            let mut vars = [None; 3];
            let ba = build(&mut backward_pool, &a, &mut vars);
            let bb = build(&mut backward_pool, &b, &mut vars);
            let backward = UnifyEngine::new(&mut backward_pool).unify(bb, ba).is_ok();

            prop_assert_eq!(forward, backward);
            if forward {
                // Both sides render identically after success.
                prop_assert_eq!(forward_pool.display(fa), forward_pool.display(fb));
            }
        }
    }
}
