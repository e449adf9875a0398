//! Type node pool: construction, variable state, and resolution.
//!
//! All type nodes of one inference session live in a single [`Pool`].
//! Variables are realized as union-find entries: an unbound variable holds
//! its constraint set, and unification links it (exactly once) to the type
//! it was equated with. `resolve` follows link chains and compresses them.

use augur_ir::{Name, SharedInterner};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::Idx;

/// Typeclass constraint tags on a type variable.
///
/// Kept sorted so set union and comparison stay allocation-light; the vast
/// majority of variables carry zero, one, or two constraints.
pub type ConstraintSet = SmallVec<[Name; 2]>;

/// A type node.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TyKind {
    /// A type variable; its mutable state lives in the pool's side table.
    Var(u32),

    /// A nullary type constructor (an opaque type identity).
    Con(Name),

    /// An applied type constructor.
    ///
    /// `head` is itself a type node: a `Con` for ordinary operators, or an
    /// unbound `Var` standing for a not-yet-known constructor (`f a`). The
    /// head is refined by ordinary variable unification, after arity has
    /// been checked.
    App {
        /// The constructor being applied.
        head: Idx,
        /// Argument types, fixed at construction.
        args: Vec<Idx>,
    },
}

/// Mutable state of a type variable.
///
/// A variable transitions `Unbound` → `Link` exactly once and is never
/// cleared.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum VarState {
    /// Not yet unified with anything.
    Unbound {
        /// Typeclass constraints accumulated by unification.
        constraints: ConstraintSet,
        /// Display-name slot, assigned lazily at first render.
        display: Option<u32>,
    },
    /// Unified: points at the type this variable was equated with.
    Link {
        /// The equated type.
        target: Idx,
    },
}

/// Pre-interned names of the builtin type constructors.
#[derive(Copy, Clone, Debug)]
pub struct Builtins {
    /// Function constructor `->` (binary).
    pub arrow: Name,
    /// List constructor `[]` (unary).
    pub list: Name,
    /// Tuple constructor `(,)` (n-ary).
    pub tuple: Name,
    /// Unit type `()`.
    pub unit: Name,
    /// Integer scalar.
    pub int: Name,
    /// Float scalar.
    pub float: Name,
    /// Boolean scalar.
    pub boolean: Name,
    /// String scalar.
    pub string: Name,
}

impl Builtins {
    /// Intern (or look up) the builtin names.
    pub fn new(interner: &SharedInterner) -> Self {
        Builtins {
            arrow: interner.intern("->"),
            list: interner.intern("[]"),
            tuple: interner.intern("(,)"),
            unit: interner.intern("()"),
            int: interner.intern("int"),
            float: interner.intern("float"),
            boolean: interner.intern("bool"),
            string: interner.intern("str"),
        }
    }
}

/// Arena of type nodes for one inference session.
///
/// Construction never fails. Nodes are immutable after construction except
/// for variable state (the one-shot unbound → link transition) and the
/// path compression performed by [`Pool::resolve`].
///
/// # Thread Safety
/// A pool is single-writer state with no internal synchronization. Callers
/// that need concurrent inference clone the pool per request instead of
/// sharing one.
#[derive(Clone)]
pub struct Pool {
    kinds: Vec<TyKind>,
    vars: Vec<VarState>,
    /// Dedup cache for nullary constructors.
    cons: FxHashMap<Name, Idx>,
    /// Next display-name slot in the rotating `a, b, c, …` sequence.
    next_display: u32,
    interner: SharedInterner,
    builtins: Builtins,
}

impl Pool {
    /// Create an empty pool sharing the given interner.
    pub fn new(interner: SharedInterner) -> Self {
        let builtins = Builtins::new(&interner);
        Pool {
            kinds: Vec::new(),
            vars: Vec::new(),
            cons: FxHashMap::default(),
            next_display: 0,
            interner,
            builtins,
        }
    }

    /// The interner this pool mints constructor names with.
    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Pre-interned builtin constructor names.
    #[inline]
    pub fn builtins(&self) -> Builtins {
        self.builtins
    }

    /// The node stored at `idx`, without resolving links.
    #[inline]
    pub fn kind(&self, idx: Idx) -> &TyKind {
        &self.kinds[idx.index()]
    }

    /// State of variable `var_id`.
    #[inline]
    pub fn var_state(&self, var_id: u32) -> &VarState {
        &self.vars[var_id as usize]
    }

    /// Variable id behind `idx`, if it is a variable node.
    pub fn var_id(&self, idx: Idx) -> Option<u32> {
        match self.kind(idx) {
            TyKind::Var(id) => Some(*id),
            _ => None,
        }
    }

    fn push(&mut self, kind: TyKind) -> Idx {
        let raw = u32::try_from(self.kinds.len()).unwrap_or_else(|_| {
            panic!("type pool exceeded u32::MAX nodes")
        });
        self.kinds.push(kind);
        Idx::from_raw(raw)
    }

    // ========================================
    // Construction
    // ========================================

    /// Allocate a fresh unbound type variable.
    pub fn fresh_var(&mut self) -> Idx {
        self.fresh_var_with(ConstraintSet::new())
    }

    /// Allocate a fresh unbound type variable carrying constraints.
    pub fn fresh_var_with(&mut self, mut constraints: ConstraintSet) -> Idx {
        constraints.sort_unstable();
        constraints.dedup();
        let var_id = u32::try_from(self.vars.len()).unwrap_or_else(|_| {
            panic!("type pool exceeded u32::MAX variables")
        });
        self.vars.push(VarState::Unbound {
            constraints,
            display: None,
        });
        self.push(TyKind::Var(var_id))
    }

    /// A nullary constructor node. Identical names share one node.
    pub fn con(&mut self, name: Name) -> Idx {
        if let Some(&idx) = self.cons.get(&name) {
            return idx;
        }
        let idx = self.push(TyKind::Con(name));
        self.cons.insert(name, idx);
        idx
    }

    /// An applied constructor node.
    ///
    /// `head` may be a `Con` or an unbound variable (a constructor
    /// placeholder). Zero-argument applications collapse to the head.
    pub fn app(&mut self, head: Idx, args: Vec<Idx>) -> Idx {
        if args.is_empty() {
            return head;
        }
        self.push(TyKind::App { head, args })
    }

    /// The function type `param -> ret`.
    pub fn function(&mut self, param: Idx, ret: Idx) -> Idx {
        let head = self.con(self.builtins.arrow);
        self.app(head, vec![param, ret])
    }

    /// The tuple type over `elems`. The empty tuple is the unit type.
    pub fn tuple(&mut self, elems: Vec<Idx>) -> Idx {
        if elems.is_empty() {
            return self.con(self.builtins.unit);
        }
        let head = self.con(self.builtins.tuple);
        self.app(head, elems)
    }

    /// The list type `[elem]`.
    pub fn list(&mut self, elem: Idx) -> Idx {
        let head = self.con(self.builtins.list);
        self.app(head, vec![elem])
    }

    // ========================================
    // Resolution
    // ========================================

    /// Resolve a type by following variable links (prune).
    ///
    /// Applies path compression: intermediate links are rewritten to point
    /// directly at the final target, so chains stay short. Always resolve
    /// before inspecting a node.
    pub fn resolve(&mut self, idx: Idx) -> Idx {
        let TyKind::Var(var_id) = *self.kind(idx) else {
            return idx;
        };
        match *self.var_state(var_id) {
            VarState::Link { target } => {
                let resolved = self.resolve(target);
                if resolved != target {
                    self.vars[var_id as usize] = VarState::Link { target: resolved };
                }
                resolved
            }
            VarState::Unbound { .. } => idx,
        }
    }

    /// Resolve without mutation (for read-only queries).
    ///
    /// Follows links but doesn't apply path compression.
    pub fn resolve_readonly(&self, idx: Idx) -> Idx {
        let TyKind::Var(var_id) = *self.kind(idx) else {
            return idx;
        };
        match *self.var_state(var_id) {
            VarState::Link { target } => self.resolve_readonly(target),
            VarState::Unbound { .. } => idx,
        }
    }

    /// Bind variable `var_id` to `target`.
    ///
    /// The unbound → link transition happens exactly once; the unification
    /// engine guarantees `var_id` is unbound when this is called.
    pub(crate) fn bind(&mut self, var_id: u32, target: Idx) {
        debug_assert!(
            matches!(self.vars[var_id as usize], VarState::Unbound { .. }),
            "variable {var_id} bound twice"
        );
        self.vars[var_id as usize] = VarState::Link { target };
    }

    // ========================================
    // Constraints
    // ========================================

    /// Constraint set of the variable behind `idx`, after resolution.
    ///
    /// Non-variables have no constraints.
    pub fn constraints_of(&self, idx: Idx) -> ConstraintSet {
        let idx = self.resolve_readonly(idx);
        match self.kind(idx) {
            TyKind::Var(var_id) => match self.var_state(*var_id) {
                VarState::Unbound { constraints, .. } => constraints.clone(),
                VarState::Link { .. } => ConstraintSet::new(),
            },
            _ => ConstraintSet::new(),
        }
    }

    /// Replace the constraint set of an unbound variable.
    pub(crate) fn set_constraints(&mut self, var_id: u32, set: ConstraintSet) {
        if let VarState::Unbound { constraints, .. } = &mut self.vars[var_id as usize] {
            *constraints = set;
        }
    }

    // ========================================
    // Structural queries
    // ========================================

    /// Head constructor name of a type, if its constructor is known.
    ///
    /// `[int]` → `[]`, `int -> bool` → `->`, `f a` with unresolved `f` →
    /// `None`.
    pub fn head_name(&self, idx: Idx) -> Option<Name> {
        let idx = self.resolve_readonly(idx);
        match self.kind(idx) {
            TyKind::Con(name) => Some(*name),
            TyKind::App { head, .. } => self.head_name(*head),
            TyKind::Var(_) => None,
        }
    }

    /// Whether variable `var` occurs anywhere inside `ty` (occurs check).
    ///
    /// `var` must resolve to an unbound variable.
    pub fn occurs_in(&self, var: Idx, ty: Idx) -> bool {
        let var = self.resolve_readonly(var);
        let ty = self.resolve_readonly(ty);
        if var == ty {
            return true;
        }
        match self.kind(ty) {
            TyKind::App { head, args } => {
                self.occurs_in(var, *head) || args.iter().any(|&a| self.occurs_in(var, a))
            }
            _ => false,
        }
    }

    /// Whether `var` occurs in any of `tys`.
    pub fn occurs_in_any<I>(&self, var: Idx, tys: I) -> bool
    where
        I: IntoIterator<Item = Idx>,
    {
        tys.into_iter().any(|ty| self.occurs_in(var, ty))
    }

    // ========================================
    // Cross-pool transfer
    // ========================================

    /// Deep-copy a type from another pool into this one.
    ///
    /// Links in the source are resolved as the copy proceeds; unbound
    /// source variables become fresh variables here, carrying their
    /// constraint sets, with sharing preserved (two occurrences of one
    /// source variable map to one variable here).
    pub fn import(&mut self, src: &Pool, idx: Idx) -> Idx {
        let mut mapping = FxHashMap::default();
        self.import_rec(src, idx, &mut mapping)
    }

    fn import_rec(&mut self, src: &Pool, idx: Idx, mapping: &mut FxHashMap<u32, Idx>) -> Idx {
        let idx = src.resolve_readonly(idx);
        match src.kind(idx) {
            TyKind::Var(var_id) => {
                if let Some(&copied) = mapping.get(var_id) {
                    return copied;
                }
                let constraints = match src.var_state(*var_id) {
                    VarState::Unbound { constraints, .. } => constraints.clone(),
                    VarState::Link { .. } => ConstraintSet::new(),
                };
                let fresh = self.fresh_var_with(constraints);
                mapping.insert(*var_id, fresh);
                fresh
            }
            TyKind::Con(name) => self.con(*name),
            TyKind::App { head, args } => {
                let head = *head;
                let args = args.clone();
                let new_head = self.import_rec(src, head, mapping);
                let new_args = args
                    .iter()
                    .map(|&a| self.import_rec(src, a, mapping))
                    .collect();
                self.app(new_head, new_args)
            }
        }
    }

    // ========================================
    // Display support
    // ========================================

    /// Display-name slot for an unbound variable, assigned on first use
    /// from the pool's rotating sequence.
    pub(crate) fn display_slot(&mut self, var_id: u32) -> u32 {
        match &self.vars[var_id as usize] {
            VarState::Unbound {
                display: Some(slot),
                ..
            } => *slot,
            VarState::Unbound { display: None, .. } => {
                let slot = self.next_display;
                self.next_display += 1;
                if let VarState::Unbound { display, .. } = &mut self.vars[var_id as usize] {
                    *display = Some(slot);
                }
                slot
            }
            VarState::Link { .. } => {
                unreachable!("display requested for a bound variable; resolve first")
            }
        }
    }
}
