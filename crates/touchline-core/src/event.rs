use smallvec::SmallVec;

/// Ordered contact points carried by one native event.
///
/// Most dispatches change one or two fingers, so the common case stays inline.
pub type ChangedTouches<C> = SmallVec<[C; 4]>;

/// A host-provided touch event.
///
/// Contact points are opaque to the normalizer and handed to the pointer
/// collaborator verbatim.
pub trait RawTouchEvent: Clone + 'static {
    type Contact;

    /// Contact points whose state changed in this dispatch, in host order.
    fn changed_touches(&self) -> ChangedTouches<Self::Contact>;

    /// Suppresses the platform's default handling of this event.
    fn prevent_default(&self);
}
