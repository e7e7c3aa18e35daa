// Copyright 2025 the Chartkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element a chart attaches its scene to.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Size;

/// A caller-supplied container element.
///
/// Components read the bounding box once, on their first render, and record the classes and
/// inline styles they apply so a backend can reproduce them on the real element.
#[derive(Clone, Debug, PartialEq)]
pub struct MountPoint {
    bounds: Size,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
}

impl MountPoint {
    /// Creates a mount point with the given bounding box size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: Size::new(width, height),
            classes: Vec::new(),
            styles: Vec::new(),
        }
    }

    /// Returns the bounding box size.
    pub fn bounding_box(&self) -> Size {
        self.bounds
    }

    /// Changes the bounding box, as a container resize would.
    ///
    /// Components that already measured the mount point ignore this.
    pub fn set_bounding_box(&mut self, width: f64, height: f64) {
        self.bounds = Size::new(width, height);
    }

    /// Adds a class if not already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Returns `true` if the class is present.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Returns the classes in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Sets an inline style property, replacing a previous value.
    pub fn set_style(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.styles.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.styles.push((name.to_string(), value)),
        }
    }

    /// Returns an inline style property.
    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the inline styles in insertion order.
    pub fn styles(&self) -> &[(String, String)] {
        &self.styles
    }
}
