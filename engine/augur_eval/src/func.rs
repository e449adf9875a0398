//! Call-time type-checked function wrapper.
//!
//! A [`TypedFunc`] pairs a native function with a declared signature. The
//! declaration is lowered once into a private pool; each invocation clones
//! that pool, lifts the supplied arguments, and analyzes the application
//! before the native body runs. Supplying a prefix of the arguments
//! returns a new wrapper over the residual type (currying); composition is
//! itself type-checked at composition time.

use std::sync::Arc;

use augur_ir::SharedInterner;
use augur_typeck::{SharedClasses, Signature, SignatureError, Term};
use augur_types::{Idx, NonGeneric, Pool, TypeEnv, UnifyEngine};

use crate::{type_of, CallError, Value};

/// Native function signature.
///
/// Natives receive the full argument list (captured prefix plus the
/// current call's arguments) and may fail with a host error.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync>;

/// A partially applied, call-time type-checked function.
#[derive(Clone)]
pub struct TypedFunc {
    native: NativeFn,
    /// Arguments captured by partial application, in order.
    captured: Vec<Value>,
    /// Parameters still expected.
    remaining: usize,
    /// Declared (or residual) type, a node in `pool`.
    ty: Idx,
    /// Private pool owning `ty`; cloned per invocation.
    pool: Pool,
    classes: SharedClasses<NativeFn>,
}

impl TypedFunc {
    /// Wrap `native` under the declared `signature`.
    ///
    /// The signature is lowered into a pool private to this wrapper; its
    /// arity becomes the parameter count.
    pub fn declare(
        native: NativeFn,
        signature: &Signature,
        interner: &SharedInterner,
        classes: SharedClasses<NativeFn>,
    ) -> Result<TypedFunc, SignatureError> {
        let mut pool = Pool::new(interner.clone());
        let ty = signature.lower(&mut pool)?;
        Ok(TypedFunc {
            native,
            captured: Vec::new(),
            remaining: signature.arity(),
            ty,
            pool,
            classes,
        })
    }

    /// Parameters still expected before the native runs.
    pub fn remaining_params(&self) -> usize {
        self.remaining
    }

    /// The wrapper's current type, imported into `pool`.
    pub fn type_in(&self, pool: &mut Pool) -> Idx {
        pool.import(&self.pool, self.ty)
    }

    /// Render the wrapper's current type.
    pub fn type_display(&self) -> String {
        let mut pool = self.pool.clone();
        pool.display(self.ty)
    }

    /// Invoke with a prefix of the remaining arguments.
    ///
    /// The application is analyzed against the declared type first; a
    /// typing failure rejects the call before the native body runs. When
    /// every parameter has been supplied the native is invoked and its
    /// actual result type is unified against the predicted one, catching
    /// implementations that disagree with their declaration. Otherwise a
    /// new wrapper over the residual type is returned.
    #[tracing::instrument(level = "debug", skip_all, fields(supplied = args.len(), remaining = self.remaining))]
    pub fn call(&self, args: &[Value]) -> Result<Value, CallError> {
        if args.len() > self.remaining {
            return Err(CallError::TooManyArguments {
                arity: self.remaining,
                supplied: args.len(),
            });
        }

        // Private session for this invocation.
        let mut pool = self.pool.clone();
        let interner = pool.interner().clone();

        // The environment holds the wrapped function's type and the
        // lifted type of every supplied argument, under synthetic names.
        let fn_name = interner.intern("#fn");
        let mut env = TypeEnv::new();
        env.bind(fn_name, self.ty);
        let mut application = Term::var(fn_name);
        for (position, arg) in args.iter().enumerate() {
            let arg_name = interner.intern(&format!("#arg{position}"));
            let arg_ty = type_of(arg, &mut pool);
            env.bind(arg_name, arg_ty);
            application = Term::app(application, Term::var(arg_name));
        }

        let result_ty = {
            let mut engine = UnifyEngine::with_classes(&mut pool, &self.classes);
            application
                .analyze(&mut engine, &env, &NonGeneric::new())
                .map_err(CallError::Type)?
        };

        if args.len() < self.remaining {
            // Partial application: close over the supplied arguments and
            // the residual type.
            let mut captured = self.captured.clone();
            captured.extend_from_slice(args);
            return Ok(Value::Func(TypedFunc {
                native: Arc::clone(&self.native),
                captured,
                remaining: self.remaining - args.len(),
                ty: result_ty,
                pool,
                classes: self.classes.clone(),
            }));
        }

        let mut full_args = self.captured.clone();
        full_args.extend_from_slice(args);
        let result = (self.native)(&full_args)?;

        // The implementation must agree with its own declaration.
        let actual_ty = type_of(&result, &mut pool);
        let mut engine = UnifyEngine::with_classes(&mut pool, &self.classes);
        if engine.unify(result_ty, actual_ty).is_err() {
            return Err(CallError::SignatureViolation {
                declared: pool.display(result_ty),
                actual: pool.display(actual_ty),
            });
        }
        Ok(result)
    }

    /// The composition `self ∘ other`: `other` first, then `self`.
    ///
    /// Builds a lambda chain over `other`'s parameters applying `self` to
    /// `other`'s full application and analyzes it, so an `other` whose
    /// output cannot feed `self` fails here, at composition time, not at
    /// call time. The composite's parameter list is `other`'s.
    pub fn compose(&self, other: &TypedFunc) -> Result<TypedFunc, CallError> {
        let mut pool = self.pool.clone();
        let other_ty = pool.import(&other.pool, other.ty);
        let interner = pool.interner().clone();

        let outer_name = interner.intern("#f");
        let inner_name = interner.intern("#g");
        let mut env = TypeEnv::new();
        env.bind(outer_name, self.ty);
        env.bind(inner_name, other_ty);

        let params: Vec<_> = (0..other.remaining)
            .map(|position| interner.intern(&format!("#x{position}")))
            .collect();
        let mut inner_app = Term::var(inner_name);
        for &param in &params {
            inner_app = Term::app(inner_app, Term::var(param));
        }
        let mut composite = Term::app(Term::var(outer_name), inner_app);
        for &param in params.iter().rev() {
            composite = Term::lam(param, composite);
        }

        let composite_ty = {
            let mut engine = UnifyEngine::with_classes(&mut pool, &self.classes);
            composite
                .analyze(&mut engine, &env, &NonGeneric::new())
                .map_err(CallError::Type)?
        };

        let outer = self.clone();
        let inner = other.clone();
        let native: NativeFn = Arc::new(move |args: &[Value]| {
            let intermediate = inner.call(args)?;
            outer.call(&[intermediate])
        });

        Ok(TypedFunc {
            native,
            captured: Vec::new(),
            remaining: other.remaining,
            ty: composite_ty,
            pool,
            classes: self.classes.clone(),
        })
    }
}

impl std::fmt::Debug for TypedFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedFunc")
            .field("remaining", &self.remaining)
            .field("captured", &self.captured.len())
            .finish_non_exhaustive()
    }
}
