//! Counting test doubles shared by the integration tests

#![allow(dead_code)]

use headerbar::{
    DirectionSignal, FitOptions, FitResult, FontFit, FontSpec, Header, Host, Measure,
    MeasureError, NodeId,
};
use std::cell::Cell;

/// Built-in font-fit that counts its calls
#[derive(Default)]
pub struct CountingMeasure {
    inner: FontFit,
    calls: Cell<usize>,
}

impl CountingMeasure {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Measure for CountingMeasure {
    fn measure(
        &self,
        text: &str,
        font: &FontSpec,
        max_width: f32,
        options: &FitOptions,
    ) -> Result<FitResult, MeasureError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.measure(text, font, max_width, options)
    }
}

/// Adjustable geometry that counts control width queries
pub struct TestHost {
    pub viewport: Cell<u32>,
    pub element: Cell<u32>,
    pub control: Cell<u32>,
    pub fail: Cell<bool>,
    control_calls: Cell<usize>,
}

impl TestHost {
    pub fn new(width: u32) -> Self {
        TestHost {
            viewport: Cell::new(width),
            element: Cell::new(width),
            control: Cell::new(50),
            fail: Cell::new(false),
            control_calls: Cell::new(0),
        }
    }

    pub fn control_calls(&self) -> usize {
        self.control_calls.get()
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.fail.get() {
            anyhow::bail!("element is not rendered");
        }
        Ok(())
    }
}

impl Host for TestHost {
    fn viewport_width(&self) -> anyhow::Result<u32> {
        self.check()?;
        Ok(self.viewport.get())
    }

    fn element_width(&self) -> anyhow::Result<u32> {
        self.check()?;
        Ok(self.element.get())
    }

    fn control_width(&self, _id: NodeId) -> anyhow::Result<u32> {
        self.check()?;
        self.control_calls.set(self.control_calls.get() + 1);
        Ok(self.control.get())
    }
}

pub type TestHeader = Header<CountingMeasure, TestHost>;

pub fn header(width: u32) -> TestHeader {
    header_in(width, &DirectionSignal::default())
}

pub fn header_in(width: u32, document: &DirectionSignal) -> TestHeader {
    Header::new(CountingMeasure::default(), TestHost::new(width), document)
}

pub fn font_size(header: &TestHeader, title: NodeId) -> Option<f32> {
    header.title_style(title)?.font_size_px()
}

pub fn margin_start(header: &TestHeader, title: NodeId) -> Option<i32> {
    header.title_style(title)?.margin_start_px()
}
