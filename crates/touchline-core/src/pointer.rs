//! Contract of the external pointer-lifecycle collaborator.

use crate::category::PointerTransition;
use std::cell::RefCell;
use std::rc::Rc;

/// Owner of logical pointer objects, fed one changed contact point at a time.
pub trait PointerLifecycle<C> {
    type Error: std::error::Error + 'static;

    fn start_pointer(&mut self, contact: &C) -> Result<(), Self::Error>;

    fn update_pointer(&mut self, contact: &C) -> Result<(), Self::Error>;

    fn stop_pointer(&mut self, contact: &C) -> Result<(), Self::Error>;

    /// Routes `contact` to the operation matching `transition`.
    fn apply(&mut self, transition: PointerTransition, contact: &C) -> Result<(), Self::Error> {
        match transition {
            PointerTransition::Begin => self.start_pointer(contact),
            PointerTransition::Update => self.update_pointer(contact),
            PointerTransition::End => self.stop_pointer(contact),
        }
    }
}

/// Lets the input manager keep its own handle to the collaborator.
impl<C, P> PointerLifecycle<C> for Rc<RefCell<P>>
where
    P: PointerLifecycle<C>,
{
    type Error = P::Error;

    fn start_pointer(&mut self, contact: &C) -> Result<(), Self::Error> {
        self.borrow_mut().start_pointer(contact)
    }

    fn update_pointer(&mut self, contact: &C) -> Result<(), Self::Error> {
        self.borrow_mut().update_pointer(contact)
    }

    fn stop_pointer(&mut self, contact: &C) -> Result<(), Self::Error> {
        self.borrow_mut().stop_pointer(contact)
    }
}
