//! Page controllers.
//!
//! Each controller owns the view state of one page (loading flag, error
//! message, fetched records, form fields) plus the handlers that call the
//! API and update that state. Loads run `loading -> (success | error)` and
//! are stamped with a [`Ticket`]. A response whose ticket has been superseded
//! by a newer load never touches the shared state; it is applied to the
//! load's own starting view, which is what that request renders.

pub mod home;
pub mod login;
pub mod pagination;
pub mod performance_detail;
pub mod performance_list;
pub mod post_detail;
pub mod post_list;
pub mod signup;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

pub use home::Home;
pub use login::Login;
pub use performance_detail::PerformanceDetail;
pub use performance_list::PerformanceList;
pub use post_detail::PostDetail;
pub use post_list::PostList;
pub use signup::SignUp;

/// What the shell should do after a handler ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<V> {
    Render(V),
    Navigate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Issues load tickets; only the most recently issued one is current.
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: AtomicU64,
}

impl Sequencer {
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Lock-guarded view state. The lock is never held across an await.
#[derive(Debug, Default)]
pub struct ViewCell<V> {
    view: Mutex<V>,
}

impl<V: Clone> ViewCell<V> {
    pub fn new(view: V) -> Self {
        Self {
            view: Mutex::new(view),
        }
    }

    pub fn snapshot(&self) -> V {
        self.update(|view| view.clone())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        let mut view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *view)
    }

    /// Start a sequenced load: issue the ticket and apply the loading state
    /// in one critical section.
    pub fn begin<R>(&self, seq: &Sequencer, f: impl FnOnce(&mut V) -> R) -> (Pending<V>, R) {
        self.update(|view| {
            let ticket = seq.issue();
            let out = f(view);
            (
                Pending {
                    ticket,
                    view: view.clone(),
                },
                out,
            )
        })
    }

    /// Apply a load's result. A current load commits it to the shared view;
    /// a superseded one applies it to its own starting view only.
    pub fn finish(&self, seq: &Sequencer, pending: Pending<V>, f: impl FnOnce(&mut V)) -> V {
        self.update(|view| {
            if seq.is_current(pending.ticket) {
                f(view);
                view.clone()
            } else {
                tracing::debug!(
                    "Superseded load (ticket {}) kept out of shared state",
                    pending.ticket.0
                );
                let mut own = pending.view;
                f(&mut own);
                own
            }
        })
    }
}

/// A load in flight: its ticket and the view as it stood once the load began.
#[derive(Debug, Clone)]
pub struct Pending<V> {
    pub ticket: Ticket,
    pub view: V,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let seq = Sequencer::default();
        let first = seq.issue();
        assert!(seq.is_current(first));
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn stale_finish_leaves_shared_view_untouched() {
        let seq = Sequencer::default();
        let cell = ViewCell::new(0u32);
        let (old, _) = cell.begin(&seq, |v| *v = 1);
        let (new, _) = cell.begin(&seq, |v| *v = 2);

        assert_eq!(cell.finish(&seq, new, |v| *v += 20), 22);
        assert_eq!(cell.finish(&seq, old, |v| *v += 10), 11);
        assert_eq!(cell.snapshot(), 22);
    }

    #[test]
    fn stale_finish_before_current_one_still_renders_its_own_result() {
        let seq = Sequencer::default();
        let cell = ViewCell::new(0u32);
        let (old, _) = cell.begin(&seq, |v| *v = 1);
        let (new, _) = cell.begin(&seq, |v| *v = 2);

        assert_eq!(cell.finish(&seq, old, |v| *v += 10), 11);
        assert_eq!(cell.snapshot(), 2);
        assert_eq!(cell.finish(&seq, new, |v| *v += 20), 22);
    }
}
