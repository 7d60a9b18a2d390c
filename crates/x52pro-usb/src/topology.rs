//! Depth-first search over a USB device tree.
//!
//! The walk mirrors how devices hang off the bus: each root hub's attached
//! devices are visited in order, a device is compared against the target
//! identity, and a hub is expanded into its own attached devices before the
//! walk moves on to the hub's next sibling.

#![deny(static_mut_refs)]

use hid_x52pro_protocol::DeviceIdentity;
use rusb::{Device, UsbContext};
use tracing::trace;

/// USB class code of a hub device.
pub const USB_CLASS_HUB: u8 = 0x09;

/// Read-only view of a USB device tree.
pub trait UsbTopology {
    type Node;

    /// Top-level nodes, in bus order.
    fn roots(&self) -> Vec<Self::Node>;

    /// Vendor/product descriptor fields, or `None` if the descriptor is unreadable.
    fn identity(&self, node: &Self::Node) -> Option<DeviceIdentity>;

    fn is_hub(&self, node: &Self::Node) -> bool;

    /// Devices attached directly to `node`; empty for non-hubs.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;
}

/// Return the first node matching `target` in depth-first order.
pub fn find_device<T: UsbTopology + ?Sized>(topology: &T, target: DeviceIdentity) -> Option<T::Node> {
    find_in(topology, topology.roots(), target)
}

fn find_in<T: UsbTopology + ?Sized>(
    topology: &T,
    nodes: Vec<T::Node>,
    target: DeviceIdentity,
) -> Option<T::Node> {
    for node in nodes {
        if topology.identity(&node) == Some(target) {
            return Some(node);
        }
        if topology.is_hub(&node)
            && let Some(found) = find_in(topology, topology.children(&node), target)
        {
            return Some(found);
        }
    }
    None
}

/// Snapshot of the libusb device list arranged as a tree.
///
/// Parent links come from libusb; devices are keyed by `(bus, address)`.
pub struct RusbTopology<C: UsbContext> {
    devices: Vec<Device<C>>,
}

impl<C: UsbContext> RusbTopology<C> {
    pub fn new(devices: Vec<Device<C>>) -> Self {
        Self { devices }
    }

    /// Enumerate every device currently attached to `context`.
    ///
    /// # Errors
    ///
    /// Returns the libusb error if the device list cannot be read.
    pub fn snapshot(context: &C) -> rusb::Result<Self> {
        let list = context.devices()?;
        let devices: Vec<Device<C>> = list.iter().collect();
        trace!(count = devices.len(), "enumerated USB devices");
        Ok(Self::new(devices))
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    fn contains(&self, key: (u8, u8)) -> bool {
        self.devices.iter().any(|device| device_key(device) == key)
    }
}

fn device_key<C: UsbContext>(device: &Device<C>) -> (u8, u8) {
    (device.bus_number(), device.address())
}

impl<C: UsbContext> UsbTopology for RusbTopology<C> {
    type Node = Device<C>;

    fn roots(&self) -> Vec<Device<C>> {
        // Backends that hide root hubs report top-level devices without a parent;
        // a parent missing from the snapshot is treated the same way.
        self.devices
            .iter()
            .filter(|device| {
                device
                    .get_parent()
                    .is_none_or(|parent| !self.contains(device_key(&parent)))
            })
            .cloned()
            .collect()
    }

    fn identity(&self, node: &Device<C>) -> Option<DeviceIdentity> {
        node.device_descriptor()
            .ok()
            .map(|desc| DeviceIdentity::new(desc.vendor_id(), desc.product_id()))
    }

    fn is_hub(&self, node: &Device<C>) -> bool {
        node.device_descriptor()
            .is_ok_and(|desc| desc.class_code() == USB_CLASS_HUB)
    }

    fn children(&self, node: &Device<C>) -> Vec<Device<C>> {
        let parent_key = device_key(node);
        self.devices
            .iter()
            .filter(|device| {
                device
                    .get_parent()
                    .is_some_and(|parent| device_key(&parent) == parent_key)
            })
            .cloned()
            .collect()
    }
}
