//! Cardano network types shared across the key wallet crates

use std::fmt;

/// Network discriminator embedded in Byron address attributes.
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ProtocolMagic(u32);

impl ProtocolMagic {
    /// Mainnet protocol magic.
    pub const MAINNET: ProtocolMagic = ProtocolMagic(764_824_073);
    /// Staging network protocol magic.
    pub const STAGING: ProtocolMagic = ProtocolMagic(633_343_913);
    /// Legacy Byron testnet protocol magic.
    pub const TESTNET: ProtocolMagic = ProtocolMagic(1_097_911_063);
    /// Pre-production testnet protocol magic.
    pub const PREPROD: ProtocolMagic = ProtocolMagic(1);
    /// Preview testnet protocol magic.
    pub const PREVIEW: ProtocolMagic = ProtocolMagic(2);

    /// Wrap a raw protocol magic value.
    pub const fn new(magic: u32) -> Self {
        ProtocolMagic(magic)
    }

    /// The raw value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The well-known network this magic belongs to, if any.
    pub fn network(self) -> Option<Network> {
        Network::from_magic(self.0)
    }

    /// Whether addresses for this magic carry the network tag attribute.
    ///
    /// Mainnet and staging addresses are emitted without it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cardano_network::ProtocolMagic;
    ///
    /// assert!(!ProtocolMagic::MAINNET.emits_network_tag());
    /// assert!(ProtocolMagic::TESTNET.emits_network_tag());
    /// ```
    pub fn emits_network_tag(self) -> bool {
        self != Self::MAINNET && self != Self::STAGING
    }
}

impl Default for ProtocolMagic {
    fn default() -> Self {
        Self::MAINNET
    }
}

impl From<u32> for ProtocolMagic {
    fn from(magic: u32) -> Self {
        ProtocolMagic(magic)
    }
}

impl From<ProtocolMagic> for u32 {
    fn from(magic: ProtocolMagic) -> Self {
        magic.0
    }
}

impl From<Network> for ProtocolMagic {
    fn from(network: Network) -> Self {
        ProtocolMagic(network.magic())
    }
}

impl fmt::Display for ProtocolMagic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The Cardano network to act on.
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Network {
    /// Cardano mainnet
    Mainnet,
    /// Staging network used by the Byron-era infrastructure
    Staging,
    /// Legacy Byron testnet
    Testnet,
    /// Pre-production testnet
    Preprod,
    /// Preview testnet
    Preview,
}

impl Network {
    /// Creates a `Network` from its protocol magic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cardano_network::Network;
    ///
    /// assert_eq!(Some(Network::Mainnet), Network::from_magic(764824073));
    /// assert_eq!(None, Network::from_magic(0xFFFFFFFF));
    /// ```
    pub fn from_magic(magic: u32) -> Option<Network> {
        // Note: any new entries here must be added to `magic` below
        match magic {
            764_824_073 => Some(Network::Mainnet),
            633_343_913 => Some(Network::Staging),
            1_097_911_063 => Some(Network::Testnet),
            1 => Some(Network::Preprod),
            2 => Some(Network::Preview),
            _ => None,
        }
    }

    /// Return the protocol magic of this network
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cardano_network::Network;
    ///
    /// assert_eq!(Network::Mainnet.magic(), 764824073);
    /// ```
    pub fn magic(self) -> u32 {
        // Note: any new entries here must be added to `from_magic` above
        match self {
            Network::Mainnet => 764_824_073,
            Network::Staging => 633_343_913,
            Network::Testnet => 1_097_911_063,
            Network::Preprod => 1,
            Network::Preview => 2,
        }
    }

    /// The protocol magic of this network
    pub fn protocol_magic(self) -> ProtocolMagic {
        ProtocolMagic(self.magic())
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Staging => write!(f, "staging"),
            Network::Testnet => write!(f, "testnet"),
            Network::Preprod => write!(f, "preprod"),
            Network::Preview => write!(f, "preview"),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "staging" => Ok(Network::Staging),
            "testnet" | "test" => Ok(Network::Testnet),
            "preprod" => Ok(Network::Preprod),
            "preview" => Ok(Network::Preview),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}
