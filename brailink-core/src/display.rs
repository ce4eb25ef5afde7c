//! Display buffer manager
//!
//! Keeps the host's last requested cell images alongside their translated,
//! device-native counterparts and tracks whether the device is out of date.
//!
//! The previous image reflects the last *requested* write, not the last
//! acknowledged one. What the device shows before the first write is unknown,
//! so the first write to a region is always sent. The dirty flag is cleared only once a frame built from
//! the current image has been handed to the transport.

use brailink_protocol::dots;
use brailink_protocol::{Frame, FrameError, MAX_MAIN_CELLS, MAX_STATUS_CELLS};
use heapless::Vec;

use crate::model::ModelDescriptor;

/// Cell slice does not match the display geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CellCountMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// One cell region: what the host asked for and what the device gets
#[derive(Debug, Clone)]
struct Region<const N: usize> {
    previous: Vec<u8, N>,
    native: Vec<u8, N>,
    /// Set once the host has written this region
    known: bool,
}

impl<const N: usize> Region<N> {
    /// Blank region of `cells` cells; fails if it exceeds the capacity
    fn new(cells: usize) -> Result<Self, CellCountMismatch> {
        let too_large = CellCountMismatch {
            expected: N,
            actual: cells,
        };
        let blank = [0u8; N];
        let image = blank.get(..cells).ok_or(too_large)?;
        Ok(Self {
            previous: Vec::from_slice(image).map_err(|_| too_large)?,
            native: Vec::from_slice(image).map_err(|_| too_large)?,
            known: false,
        })
    }

    /// Returns true if the region changed
    fn update(&mut self, cells: &[u8]) -> Result<bool, CellCountMismatch> {
        if cells.len() != self.previous.len() {
            return Err(CellCountMismatch {
                expected: self.previous.len(),
                actual: cells.len(),
            });
        }
        if self.known && self.previous.as_slice() == cells {
            return Ok(false);
        }
        self.known = true;
        for ((previous, native), &cell) in self
            .previous
            .iter_mut()
            .zip(self.native.iter_mut())
            .zip(cells)
        {
            *previous = cell;
            *native = dots::to_device(cell);
        }
        Ok(true)
    }
}

/// Main and status cell images for one session
#[derive(Debug, Clone)]
pub struct DisplayBuffer {
    main: Region<MAX_MAIN_CELLS>,
    status: Region<MAX_STATUS_CELLS>,
    dirty: bool,
}

impl DisplayBuffer {
    /// Blank, clean buffers sized for the model
    ///
    /// Fails if the model's geometry exceeds the frame limits.
    pub fn new(model: &ModelDescriptor) -> Result<Self, CellCountMismatch> {
        Ok(Self {
            main: Region::new(model.columns as usize)?,
            status: Region::new(model.status_cells as usize)?,
            dirty: false,
        })
    }

    /// Store new main cells (host dot order)
    ///
    /// Repeating the previous content is a no-op.
    pub fn set_main(&mut self, cells: &[u8]) -> Result<(), CellCountMismatch> {
        if self.main.update(cells)? {
            self.dirty = true;
        }
        Ok(())
    }

    /// Store new status cells (host dot order)
    pub fn set_status(&mut self, cells: &[u8]) -> Result<(), CellCountMismatch> {
        if self.status.update(cells)? {
            self.dirty = true;
        }
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the current image to be sent again
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Called once the frame has been queued to the transport
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Build an update frame from the current image
    pub fn build_frame(&self, model: &ModelDescriptor) -> Result<Frame, FrameError> {
        Frame::build(&model.envelope(), &self.status.native, &self.main.native)
    }

    /// Main cells in device dot order
    pub fn native_main(&self) -> &[u8] {
        &self.main.native
    }

    /// Status cells in device dot order
    pub fn native_status(&self) -> &[u8] {
        &self.status.native
    }
}
