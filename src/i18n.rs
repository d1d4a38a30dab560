//! Text direction and the document-level direction signal
//!
//! Every header on a page mirrors its layout when the document direction
//! flips. Instead of a mutable global, the document owns a [`DirectionSignal`]
//! and each attached header holds a [`DirectionSubscription`] that it drains
//! at the next turn boundary.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Text reading direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    /// Detect text direction from language code
    pub fn from_lang(lang: &str) -> Self {
        // RTL languages
        if lang.starts_with("ar") ||  // Arabic
           lang.starts_with("he") ||  // Hebrew
           lang.starts_with("fa") ||  // Persian/Farsi
           lang.starts_with("ur") ||  // Urdu
           lang.starts_with("yi")
        // Yiddish
        {
            TextDirection::RightToLeft
        } else {
            TextDirection::LeftToRight
        }
    }

    /// Parse a `dir` attribute value. `auto` and garbage yield `None`.
    pub fn from_dir_attr(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ltr" => Some(TextDirection::LeftToRight),
            "rtl" => Some(TextDirection::RightToLeft),
            _ => None,
        }
    }

    /// Check if this is RTL
    pub fn is_rtl(&self) -> bool {
        matches!(self, TextDirection::RightToLeft)
    }

    /// Attribute spelling (`ltr` / `rtl`)
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::LeftToRight => "ltr",
            TextDirection::RightToLeft => "rtl",
        }
    }
}

/// Identifier handed out by [`DirectionSignal::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    mailbox: Rc<Cell<Option<TextDirection>>>,
}

struct SignalInner {
    current: TextDirection,
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Document-wide direction, observable by any number of headers
///
/// Cloning yields another handle to the same signal.
#[derive(Clone)]
pub struct DirectionSignal {
    inner: Rc<RefCell<SignalInner>>,
}

impl DirectionSignal {
    /// Create a signal with an initial direction
    pub fn new(initial: TextDirection) -> Self {
        DirectionSignal {
            inner: Rc::new(RefCell::new(SignalInner {
                current: initial,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Create a signal for a document language
    pub fn for_lang(lang: &str) -> Self {
        Self::new(TextDirection::from_lang(lang))
    }

    /// Current document direction
    pub fn get(&self) -> TextDirection {
        self.inner.borrow().current
    }

    /// Publish a new direction. Returns how many subscribers were notified;
    /// setting the current value again notifies nobody.
    pub fn set(&self, direction: TextDirection) -> usize {
        let mut inner = self.inner.borrow_mut();
        if inner.current == direction {
            return 0;
        }
        inner.current = direction;
        for sub in &inner.subscribers {
            sub.mailbox.set(Some(direction));
        }
        tracing::debug!(dir = direction.as_str(), subscribers = inner.subscribers.len(), "document direction changed");
        inner.subscribers.len()
    }

    /// Register a new subscriber
    pub fn subscribe(&self) -> DirectionSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;

        let mailbox = Rc::new(Cell::new(None));
        inner.subscribers.push(Subscriber {
            id,
            mailbox: Rc::clone(&mailbox),
        });

        DirectionSubscription { id, mailbox }
    }

    /// Drop a subscriber. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.borrow_mut().subscribers.retain(|s| s.id != id);
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl Default for DirectionSignal {
    fn default() -> Self {
        Self::new(TextDirection::LeftToRight)
    }
}

impl std::fmt::Debug for DirectionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("DirectionSignal")
            .field("current", &inner.current)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// A header's view of the document direction
#[derive(Debug)]
pub struct DirectionSubscription {
    id: SubscriptionId,
    mailbox: Rc<Cell<Option<TextDirection>>>,
}

impl DirectionSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Take the latest published direction, if any arrived since the last call
    pub fn take(&self) -> Option<TextDirection> {
        self.mailbox.take()
    }
}
