//! Host geometry - widths the header cannot know by itself

use crate::dom::NodeId;
use anyhow::Result;
use std::rc::Rc;

/// Geometry provided by the embedding application
///
/// Only queried at turn boundaries, and never for a side whose reserved space
/// is given explicitly through `title-start` / `title-end`.
pub trait Host {
    /// Current viewport width (used in flush mode)
    fn viewport_width(&self) -> Result<u32>;

    /// Rendered width of the header element itself (used when not flush)
    fn element_width(&self) -> Result<u32>;

    /// Rendered width of a light-DOM control
    fn control_width(&self, id: NodeId) -> Result<u32>;
}

impl<H: Host + ?Sized> Host for &H {
    fn viewport_width(&self) -> Result<u32> {
        (**self).viewport_width()
    }

    fn element_width(&self) -> Result<u32> {
        (**self).element_width()
    }

    fn control_width(&self, id: NodeId) -> Result<u32> {
        (**self).control_width(id)
    }
}

impl<H: Host + ?Sized> Host for Rc<H> {
    fn viewport_width(&self) -> Result<u32> {
        (**self).viewport_width()
    }

    fn element_width(&self) -> Result<u32> {
        (**self).element_width()
    }

    fn control_width(&self, id: NodeId) -> Result<u32> {
        (**self).control_width(id)
    }
}

/// Fixed geometry: one viewport width, one element width, one control width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHost {
    pub viewport: u32,
    pub element: u32,
    pub control: u32,
}

impl FixedHost {
    /// Element as wide as the viewport, 50px controls
    pub fn new(viewport: u32) -> Self {
        FixedHost {
            viewport,
            element: viewport,
            control: 50,
        }
    }

    pub fn with_element_width(mut self, width: u32) -> Self {
        self.element = width;
        self
    }

    pub fn with_control_width(mut self, width: u32) -> Self {
        self.control = width;
        self
    }
}

impl Host for FixedHost {
    fn viewport_width(&self) -> Result<u32> {
        Ok(self.viewport)
    }

    fn element_width(&self) -> Result<u32> {
        Ok(self.element)
    }

    fn control_width(&self, _id: NodeId) -> Result<u32> {
        Ok(self.control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_host() {
        let host = FixedHost::new(320).with_element_width(300).with_control_width(44);
        assert_eq!(host.viewport_width().unwrap(), 320);
        assert_eq!(host.element_width().unwrap(), 300);
        assert_eq!(host.control_width(NodeId(7)).unwrap(), 44);
    }

    #[test]
    fn test_shared_host() {
        let host = Rc::new(FixedHost::new(480));
        let borrowed: &dyn Host = &*host;
        assert_eq!(borrowed.viewport_width().unwrap(), 480);
        assert_eq!(host.element_width().unwrap(), 480);
    }
}
