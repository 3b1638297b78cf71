//! Reducer composition utilities
//!
//! - **`combine_reducers`**: Run several reducers on the same state/action, in order
//! - **`scope_reducer`**: Focus a reducer on one slice of a larger state
//!
//! The storefront root reducer is built from both: the catalog and cart
//! reducers are scoped onto their slices, then combined with the checkout
//! reducer that needs the whole state.

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::sync::Arc;

/// Boxed reducer that can be shared across the runtime's tasks
pub type BoxedReducer<S, A, E> =
    Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer runs in the order given, all seeing the same action, and all
/// effects are concatenated. Later reducers observe the state as left by the
/// earlier ones.
///
/// # Examples
///
/// ```
/// use storefront_core::composition::{BoxedReducer, combine_reducers};
/// use storefront_core::{effect::Effect, reducer::Reducer, SmallVec};
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     views: u32,
///     last_seen: Option<String>,
/// }
///
/// #[derive(Clone)]
/// enum AppAction {
///     View(String),
/// }
///
/// struct ViewCounter;
/// struct LastSeen;
///
/// impl Reducer for ViewCounter {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut AppState, _action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
///         state.views += 1;
///         SmallVec::new()
///     }
/// }
///
/// impl Reducer for LastSeen {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut AppState, action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
///         let AppAction::View(name) = action;
///         state.last_seen = Some(name);
///         SmallVec::new()
///     }
/// }
///
/// let reducers: Vec<BoxedReducer<AppState, AppAction, ()>> =
///     vec![Box::new(ViewCounter), Box::new(LastSeen)];
/// let combined = combine_reducers(reducers);
///
/// let mut state = AppState::default();
/// let _ = combined.reduce(&mut state, AppAction::View("p1".to_string()), &());
/// assert_eq!(state.views, 1);
/// assert_eq!(state.last_seen.as_deref(), Some("p1"));
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer {
        reducers: reducers.into(),
    }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`]. Cloning is cheap: the reducer list is shared.
pub struct CombinedReducer<S, A, E> {
    reducers: Arc<[BoxedReducer<S, A, E>]>,
}

impl<S, A, E> CombinedReducer<S, A, E> {
    /// Number of reducers in the combination
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Whether the combination is empty (a no-op reducer)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> Clone for CombinedReducer<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            reducers: Arc::clone(&self.reducers),
        }
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in self.reducers.iter() {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// The child reducer works on a copy of the slice, and the result is written
/// back wholesale. The slice is therefore always replaced, never patched.
///
/// # Examples
///
/// ```
/// use storefront_core::composition::scope_reducer;
/// use storefront_core::{effect::Effect, reducer::Reducer, SmallVec};
///
/// #[derive(Clone, Default)]
/// struct Tally {
///     count: i32,
/// }
///
/// #[derive(Clone)]
/// enum TallyAction {
///     Bump,
/// }
///
/// struct TallyReducer;
///
/// impl Reducer for TallyReducer {
///     type State = Tally;
///     type Action = TallyAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut Tally, _action: TallyAction, _env: &()) -> SmallVec<[Effect<TallyAction>; 4]> {
///         state.count += 1;
///         SmallVec::new()
///     }
/// }
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     tally: Tally,
///     label: String,
/// }
///
/// let scoped = scope_reducer(
///     TallyReducer,
///     |app: &AppState| &app.tally,
///     |app: &mut AppState, tally: Tally| app.tally = tally,
/// );
///
/// let mut state = AppState::default();
/// let _ = scoped.reduce(&mut state, TallyAction::Bump, &());
/// assert_eq!(state.tally.count, 1);
/// ```
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, E, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R> {
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<fn() -> (A, E)>,
}

impl<S, SubS, A, E, R: Clone> Clone for ScopedReducer<S, SubS, A, E, R> {
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            get_state: self.get_state,
            set_state: self.set_state,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<S, SubS, A, E, R: std::fmt::Debug> std::fmt::Debug for ScopedReducer<S, SubS, A, E, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedReducer")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut sub_state = (self.get_state)(state).clone();

        let effects = self.reducer.reduce(&mut sub_state, action, env);

        (self.set_state)(state, sub_state);

        effects
    }
}
