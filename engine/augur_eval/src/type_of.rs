//! Lifting runtime values into the type system.

use std::sync::Arc;

use augur_ir::Name;
use augur_typeck::{ClassError, ClassRegistry, Instance};
use augur_types::{Builtins, Idx, Pool};

use crate::{NativeFn, Value};

/// The type of a runtime value, as a node in `pool`.
///
/// Sequences take their element type from the first element; an empty list
/// lifts to a list of a fresh variable, so it unifies with any element
/// type. A wrapped function contributes its declared (residual) type,
/// imported into `pool`. Algebraic values lift to their declared type
/// constructor.
pub fn type_of(value: &Value, pool: &mut Pool) -> Idx {
    let builtins = pool.builtins();
    match value {
        Value::Unit => pool.con(builtins.unit),
        Value::Int(_) => pool.con(builtins.int),
        Value::Float(_) => pool.con(builtins.float),
        Value::Bool(_) => pool.con(builtins.boolean),
        Value::Str(_) => pool.con(builtins.string),
        Value::List(items) => {
            let elem = match items.first() {
                Some(first) => type_of(first, pool),
                None => pool.fresh_var(),
            };
            pool.list(elem)
        }
        Value::Tuple(items) => {
            let elems = items.iter().map(|item| type_of(item, pool)).collect();
            pool.tuple(elems)
        }
        Value::Data { type_name, .. } => pool.con(*type_name),
        Value::Func(func) => func.type_in(pool),
    }
}

/// The instance-lookup key for a value: its structural type's head
/// constructor.
///
/// Lists key by the list constructor, tuples by the tuple constructor,
/// algebraic values by their declared type tag, functions by the arrow,
/// scalars by their own constructor.
pub fn type_key(value: &Value, builtins: Builtins) -> Name {
    match value {
        Value::Unit => builtins.unit,
        Value::Int(_) => builtins.int,
        Value::Float(_) => builtins.float,
        Value::Bool(_) => builtins.boolean,
        Value::Str(_) => builtins.string,
        Value::List(_) => builtins.list,
        Value::Tuple(_) => builtins.tuple,
        Value::Data { type_name, .. } => *type_name,
        Value::Func(_) => builtins.arrow,
    }
}

/// The method table of `class` for `value`, by its type key.
///
/// On absence, fails rendering the value's full structural type rather
/// than the bare key, so `[1, 2]` reports `[int]`.
pub fn lookup_for_value<'r>(
    registry: &'r ClassRegistry<NativeFn>,
    class: Name,
    value: &Value,
) -> Result<&'r Arc<Instance<NativeFn>>, ClassError> {
    let interner = registry.interner();
    let key = type_key(value, Builtins::new(interner));
    if registry.has_instance(key, class) {
        return registry.lookup_instance(class, key);
    }
    let mut pool = Pool::new(interner.clone());
    let ty = type_of(value, &mut pool);
    Err(ClassError::NoInstance {
        class: interner.lookup(class).to_owned(),
        ty: pool.display(ty),
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use augur_ir::SharedInterner;
    use pretty_assertions::assert_eq;

    fn pool() -> Pool {
        Pool::new(SharedInterner::new())
    }

    #[test]
    fn scalars_lift_to_their_constructors() {
        let mut pool = pool();
        let ty = type_of(&Value::int(1), &mut pool);
        assert_eq!(pool.display(ty), "int");
        let ty = type_of(&Value::string("x"), &mut pool);
        assert_eq!(pool.display(ty), "str");
        let ty = type_of(&Value::Unit, &mut pool);
        assert_eq!(pool.display(ty), "()");
    }

    #[test]
    fn list_takes_element_type() {
        let mut pool = pool();
        let ty = type_of(&Value::list(vec![Value::int(1), Value::int(2)]), &mut pool);
        assert_eq!(pool.display(ty), "[int]");
    }

    #[test]
    fn empty_list_is_polymorphic() {
        let mut pool = pool();
        let ty = type_of(&Value::list(Vec::new()), &mut pool);
        assert_eq!(pool.display(ty), "[a]");
    }

    #[test]
    fn tuple_lifts_elementwise() {
        let mut pool = pool();
        let value = Value::tuple(vec![Value::int(1), Value::bool(true)]);
        let ty = type_of(&value, &mut pool);
        assert_eq!(pool.display(ty), "(int, bool)");
    }

    #[test]
    fn data_lifts_to_declared_tag() {
        let interner = SharedInterner::new();
        let mut pool = Pool::new(interner.clone());
        let color = interner.intern("Color");
        let red = interner.intern("Red");
        let value = Value::data(color, red, Vec::new());
        let ty = type_of(&value, &mut pool);
        assert_eq!(pool.display(ty), "Color");
        assert_eq!(type_key(&value, pool.builtins()), color);
    }

    #[test]
    fn list_keys_by_sequence_constructor() {
        let pool = pool();
        let key = type_key(&Value::list(vec![Value::int(1)]), pool.builtins());
        assert_eq!(key, pool.builtins().list);
    }
}
