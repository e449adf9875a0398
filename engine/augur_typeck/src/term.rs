//! Typed-lambda-calculus AST and type inference.
//!
//! Four node kinds drive the unification engine to compute an expression's
//! type in an environment. There is no explicit inference state beyond the
//! pool's unification graph threaded through recursive descent: analysis
//! either returns a type or fails with a `TypeError`, and no partial state
//! survives a failure.

use augur_ir::{Name, StringInterner};
use augur_types::{instantiate, Idx, NonGeneric, TypeEnv, TypeError, UnifyEngine};

/// A node in the typed lambda calculus.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Term {
    /// Variable/identifier reference.
    Var(Name),

    /// Function application of a single argument.
    ///
    /// Functions over several arguments are curried.
    App(Box<Term>, Box<Term>),

    /// Lambda abstraction.
    Lam(Name, Box<Term>),

    /// Let binding (always recursive).
    Let(Name, Box<Term>, Box<Term>),
}

impl Term {
    /// A variable reference.
    pub fn var(name: Name) -> Term {
        Term::Var(name)
    }

    /// An application `(fn arg)`.
    pub fn app(fun: Term, arg: Term) -> Term {
        Term::App(Box::new(fun), Box::new(arg))
    }

    /// A lambda abstraction `(\param -> body)`.
    pub fn lam(param: Name, body: Term) -> Term {
        Term::Lam(param, Box::new(body))
    }

    /// A recursive let binding `(let name = def in body)`.
    pub fn let_in(name: Name, def: Term, body: Term) -> Term {
        Term::Let(name, Box::new(def), Box::new(body))
    }

    /// Compute the type of this expression.
    ///
    /// The type is computed in the context of `env`; data types are
    /// introduced simply by predefining identifiers in the initial
    /// environment, so extending the language needs no analyzer changes.
    /// `non_generic` holds the variables pinned by enclosing scopes.
    ///
    /// Any unification failure aborts the whole analysis with a
    /// `TypeError`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn analyze(
        &self,
        engine: &mut UnifyEngine<'_, '_>,
        env: &TypeEnv,
        non_generic: &NonGeneric,
    ) -> Result<Idx, TypeError> {
        match self {
            Term::Var(name) => {
                let Some(scheme) = env.lookup(*name) else {
                    return Err(TypeError::UndefinedSymbol {
                        name: engine.pool().interner().lookup(*name).to_owned(),
                    });
                };
                Ok(instantiate(engine.pool_mut(), scheme, non_generic))
            }

            Term::App(fun, arg) => {
                let fun_ty = fun.analyze(engine, env, non_generic)?;
                let arg_ty = arg.analyze(engine, env, non_generic)?;
                let result_ty = engine.fresh_var();
                let expected = engine.pool_mut().function(arg_ty, result_ty);
                engine
                    .unify(expected, fun_ty)
                    .map_err(|err| TypeError::from_unify(err, engine.pool_mut()))?;
                Ok(result_ty)
            }

            Term::Lam(param, body) => {
                let param_ty = engine.fresh_var();
                let mut body_env = env.child();
                body_env.bind(*param, param_ty);
                let body_non_generic = non_generic.with(param_ty);
                let body_ty = body.analyze(engine, &body_env, &body_non_generic)?;
                Ok(engine.pool_mut().function(param_ty, body_ty))
            }

            Term::Let(name, def, body) => {
                // The binding is visible while its own definition is
                // analyzed (letrec), pinned non-generic so self-references
                // do not instantiate it.
                let binding_ty = engine.fresh_var();
                let mut scope = env.child();
                scope.bind(*name, binding_ty);
                let def_non_generic = non_generic.with(binding_ty);
                let def_ty = def.analyze(engine, &scope, &def_non_generic)?;
                engine
                    .unify(binding_ty, def_ty)
                    .map_err(|err| TypeError::from_unify(err, engine.pool_mut()))?;
                body.analyze(engine, &scope, non_generic)
            }
        }
    }

    /// Render the term for debugging and error context.
    pub fn display(&self, interner: &StringInterner) -> String {
        match self {
            Term::Var(name) => interner.lookup(*name).to_owned(),
            Term::App(fun, arg) => {
                format!("({} {})", fun.display(interner), arg.display(interner))
            }
            Term::Lam(param, body) => {
                format!(
                    "(\\{} -> {})",
                    interner.lookup(*param),
                    body.display(interner)
                )
            }
            Term::Let(name, def, body) => {
                format!(
                    "(let {} = {} in {})",
                    interner.lookup(*name),
                    def.display(interner),
                    body.display(interner)
                )
            }
        }
    }
}
