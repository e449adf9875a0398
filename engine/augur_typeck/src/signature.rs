//! Declarative type signatures.
//!
//! A [`Signature`] is the pool-independent description of a function type,
//! the form in which hosts declare wrapped functions: ordered argument
//! segments (`a -> a -> a` is three segments) plus a list of typeclass
//! constraints on signature variables (`Num a`). Lowering allocates one
//! constrained variable per distinct signature variable and folds the
//! segments into a right-associated function chain.
//!
//! Keeping signatures out of any pool lets a wrapper lower its declaration
//! into a private session per call instead of sharing one mutable graph.

use augur_ir::Name;
use augur_types::{ConstraintSet, Idx, Pool};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// A signature the builder cannot map into the type grammar.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum SignatureError {
    /// Structurally invalid signature description.
    #[error("malformed signature: {reason}")]
    Malformed {
        /// What was wrong with it.
        reason: String,
    },
}

/// One segment of a signature: a pool-independent type expression.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SigType {
    /// A signature variable (`a`), shared across all segments that name it.
    Var(String),

    /// A constructor, possibly applied (`int`, `Maybe a`).
    Con {
        /// Constructor identity.
        name: Name,
        /// Type arguments, empty for plain types.
        args: Vec<SigType>,
    },

    /// A nested function type (`(a -> b)` in `(a -> b) -> [a] -> [b]`).
    Function {
        /// Parameter type.
        param: Box<SigType>,
        /// Result type.
        ret: Box<SigType>,
    },

    /// A tuple type.
    Tuple(Vec<SigType>),

    /// A list type.
    List(Box<SigType>),
}

impl SigType {
    /// A signature variable.
    pub fn var(name: impl Into<String>) -> SigType {
        SigType::Var(name.into())
    }

    /// A plain (unapplied) constructor.
    pub fn con(name: Name) -> SigType {
        SigType::Con {
            name,
            args: Vec::new(),
        }
    }

    /// An applied constructor.
    pub fn con_app(name: Name, args: Vec<SigType>) -> SigType {
        SigType::Con { name, args }
    }

    /// A nested function type.
    pub fn function(param: SigType, ret: SigType) -> SigType {
        SigType::Function {
            param: Box::new(param),
            ret: Box::new(ret),
        }
    }

    /// A list type.
    pub fn list(elem: SigType) -> SigType {
        SigType::List(Box::new(elem))
    }

    fn collect_vars<'s>(&'s self, vars: &mut Vec<&'s str>) {
        match self {
            SigType::Var(name) => {
                if !vars.contains(&name.as_str()) {
                    vars.push(name);
                }
            }
            SigType::Con { args, .. } => {
                for arg in args {
                    arg.collect_vars(vars);
                }
            }
            SigType::Function { param, ret } => {
                param.collect_vars(vars);
                ret.collect_vars(vars);
            }
            SigType::Tuple(elems) => {
                for elem in elems {
                    elem.collect_vars(vars);
                }
            }
            SigType::List(elem) => elem.collect_vars(vars),
        }
    }

    fn lower(&self, pool: &mut Pool, vars: &mut FxHashMap<String, Idx>) -> Idx {
        match self {
            SigType::Var(name) => {
                if let Some(&idx) = vars.get(name) {
                    return idx;
                }
                // Constraints were attached when the variable table was
                // seeded; a variable only reachable from here is
                // unconstrained.
                let idx = pool.fresh_var();
                vars.insert(name.clone(), idx);
                idx
            }
            SigType::Con { name, args } => {
                let head = pool.con(*name);
                let args = args.iter().map(|a| a.lower(pool, vars)).collect();
                pool.app(head, args)
            }
            SigType::Function { param, ret } => {
                let param = param.lower(pool, vars);
                let ret = ret.lower(pool, vars);
                pool.function(param, ret)
            }
            SigType::Tuple(elems) => {
                let elems = elems.iter().map(|e| e.lower(pool, vars)).collect();
                pool.tuple(elems)
            }
            SigType::List(elem) => {
                let elem = elem.lower(pool, vars);
                pool.list(elem)
            }
        }
    }
}

/// A function signature: constraints plus ordered segments.
///
/// `Num a => a -> a -> a` is
/// `Signature::with_constraints(vec![(num, "a")], vec![var, var, var])`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Signature {
    /// (typeclass, variable) constraint pairs.
    constraints: Vec<(Name, String)>,
    /// Parameter segments followed by the result segment.
    args: Vec<SigType>,
}

impl Signature {
    /// An unconstrained signature over the given segments.
    pub fn new(args: Vec<SigType>) -> Self {
        Signature {
            constraints: Vec::new(),
            args,
        }
    }

    /// A signature with typeclass constraints on its variables.
    pub fn with_constraints(constraints: Vec<(Name, String)>, args: Vec<SigType>) -> Self {
        Signature { constraints, args }
    }

    /// Number of parameters a function with this signature takes.
    pub fn arity(&self) -> usize {
        self.args.len().saturating_sub(1)
    }

    /// Lower the signature into `pool` as a curried function type.
    ///
    /// Every distinct signature variable becomes one fresh pool variable
    /// carrying the constraints declared for it; segments are folded
    /// right-associatively (`[a, a, a]` lowers to `a -> (a -> a)`).
    pub fn lower(&self, pool: &mut Pool) -> Result<Idx, SignatureError> {
        if self.args.len() < 2 {
            return Err(SignatureError::Malformed {
                reason: "a function signature needs at least one parameter and a result"
                    .to_owned(),
            });
        }

        let mut used = Vec::new();
        for arg in &self.args {
            arg.collect_vars(&mut used);
        }
        for (class, var) in &self.constraints {
            if !used.contains(&var.as_str()) {
                let class = pool.interner().lookup(*class).to_owned();
                return Err(SignatureError::Malformed {
                    reason: format!(
                        "constraint `{class} {var}` names a variable the signature never uses"
                    ),
                });
            }
        }

        // Seed the variable table with constrained variables so every
        // occurrence shares the constraint-carrying node.
        let mut vars: FxHashMap<String, Idx> = FxHashMap::default();
        for (class, var) in &self.constraints {
            if let Some(&idx) = vars.get(var) {
                let mut merged: ConstraintSet = pool.constraints_of(idx);
                if !merged.contains(class) {
                    merged.push(*class);
                }
                let with_more = pool.fresh_var_with(merged);
                vars.insert(var.clone(), with_more);
            } else {
                let idx = pool.fresh_var_with(ConstraintSet::from_slice(&[*class]));
                vars.insert(var.clone(), idx);
            }
        }

        let lowered: Vec<Idx> = self
            .args
            .iter()
            .map(|arg| arg.lower(pool, &mut vars))
            .collect();

        let mut ty = lowered[lowered.len() - 1];
        for &param in lowered[..lowered.len() - 1].iter().rev() {
            ty = pool.function(param, ty);
        }
        Ok(ty)
    }
}
