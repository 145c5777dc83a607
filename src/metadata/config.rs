//! Decoder configuration
//!
//! The defaults reproduce the established behaviour of the decoder, including two quirks: a
//! synchronized method is assumed to reserve an extra local-variable slot ahead of its
//! parameters, and array tokens decode to a generic marker type. Each quirk can be switched
//! off on its own.

/// How the modifier `synchronized` affects the local-variable slot of the first parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynchronizedSlot {
    /// Synchronized methods reserve one extra slot before their parameters
    #[default]
    Reserved,
    /// Synchronized has no effect on slots (JVMS §2.6.1)
    Ignored,
}

/// How array tokens (`[...`) are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayDecoding {
    /// Every array decodes to the generic array marker
    #[default]
    Marker,
    /// Arrays decode to an array handle of their resolved element type
    ElementAware,
}

/// Configuration for [`crate::MethodDecoder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderConfig {
    /// Slot layout of synchronized methods
    pub synchronized_slot: SynchronizedSlot,
    /// Decoding of array tokens
    pub array_decoding: ArrayDecoding,
}

impl DecoderConfig {
    /// The established behaviour, identical to [`DecoderConfig::default`].
    #[must_use]
    pub fn legacy() -> Self {
        Self::default()
    }

    /// Behaviour following the JVM specification: no extra slot for synchronized methods and
    /// element-aware array handles.
    #[must_use]
    pub fn jvms() -> Self {
        Self {
            synchronized_slot: SynchronizedSlot::Ignored,
            array_decoding: ArrayDecoding::ElementAware,
        }
    }

    /// Replace the synchronized slot layout.
    #[must_use]
    pub fn with_synchronized_slot(mut self, synchronized_slot: SynchronizedSlot) -> Self {
        self.synchronized_slot = synchronized_slot;
        self
    }

    /// Replace the array decoding.
    #[must_use]
    pub fn with_array_decoding(mut self, array_decoding: ArrayDecoding) -> Self {
        self.array_decoding = array_decoding;
        self
    }
}
