//! Byron bootstrap-era addresses
//!
//! An address commits to a public key and chain code through a double hash
//! (SHA3-256 then Blake2b-224) of its spending data, carries a small
//! attribute map with the network tag, and is protected by a CRC32 before
//! base58 encoding.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use std::io::Cursor;

use blake2::digest::consts::U28;
use blake2::{Blake2b, Digest};
use cardano_network::ProtocolMagic;
use cbor_event::de::Deserializer;
use cbor_event::se::Serializer;
use cbor_event::Len;
use sha3::Sha3_256;

use crate::error::{Error, Result};
use crate::extended_key::XPub;

type Blake2b224 = Blake2b<U28>;

type SliceDeserializer<'a, 'b> = Deserializer<&'a mut Cursor<&'b [u8]>>;

/// Size of the address root hash
pub const ADDRESS_ROOT_SIZE: usize = 28;

/// Address type for a plain public key spending condition
pub const ADDR_TYPE_PUBKEY: u64 = 0;

const SPENDING_DATA_PUBKEY: u64 = 0;
const ATTR_DERIVATION_PATH: u64 = 1;
const ATTR_PROTOCOL_MAGIC: u64 = 2;

/// CBOR tag for an embedded CBOR data item
const TAG_ENCODED_CBOR: u64 = 24;

/// Address attributes
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Attributes {
    /// Encrypted derivation path of legacy random-index wallets, kept opaque
    pub derivation_path: Option<Vec<u8>>,
    /// Network tag, absent on mainnet and staging
    pub protocol_magic: Option<ProtocolMagic>,
}

impl Attributes {
    /// Attributes for a fresh address on the network identified by `magic`
    pub fn new(magic: ProtocolMagic) -> Self {
        Attributes {
            derivation_path: None,
            protocol_magic: magic.emits_network_tag().then_some(magic),
        }
    }

    fn serialize<'se, W: std::io::Write>(
        &self,
        serializer: &'se mut Serializer<W>,
    ) -> cbor_event::Result<&'se mut Serializer<W>> {
        let len = self.derivation_path.is_some() as u64 + self.protocol_magic.is_some() as u64;
        serializer.write_map(Len::Len(len))?;
        if let Some(path) = &self.derivation_path {
            serializer.write_unsigned_integer(ATTR_DERIVATION_PATH)?.write_bytes(path)?;
        }
        if let Some(magic) = self.protocol_magic {
            let mut inner = Serializer::new_vec();
            inner.write_unsigned_integer(magic.value() as u64)?;
            serializer.write_unsigned_integer(ATTR_PROTOCOL_MAGIC)?.write_bytes(inner.finalize())?;
        }
        Ok(serializer)
    }

    fn deserialize(raw: &mut SliceDeserializer<'_, '_>) -> Result<Self> {
        let len = match raw.map()? {
            Len::Len(len) => len,
            Len::Indefinite => {
                return Err(Error::InvalidAddress("indefinite attribute map".into()));
            }
        };
        let mut attributes = Attributes::default();
        for _ in 0..len {
            match raw.unsigned_integer()? {
                ATTR_DERIVATION_PATH => attributes.derivation_path = Some(raw.bytes()?),
                ATTR_PROTOCOL_MAGIC => {
                    let inner = raw.bytes()?;
                    let magic = decode_exact(&inner, |raw| Ok(raw.unsigned_integer()?))?;
                    let magic = u32::try_from(magic)
                        .map_err(|_| Error::InvalidAddress("protocol magic overflow".into()))?;
                    attributes.protocol_magic = Some(ProtocolMagic::new(magic));
                }
                key => {
                    return Err(Error::InvalidAddress(format!("unknown attribute {}", key)));
                }
            }
        }
        Ok(attributes)
    }
}

/// Run `f` over `bytes`, which must hold exactly one CBOR item.
fn decode_exact<T>(
    bytes: &[u8],
    f: impl FnOnce(&mut SliceDeserializer<'_, '_>) -> Result<T>,
) -> Result<T> {
    let mut cursor = Cursor::new(bytes);
    let value = f(&mut Deserializer::from(&mut cursor))?;
    if cursor.position() != bytes.len() as u64 {
        return Err(Error::InvalidAddress("trailing bytes after CBOR item".into()));
    }
    Ok(value)
}

fn expect_array(raw: &mut SliceDeserializer<'_, '_>, expected: u64, what: &str) -> Result<()> {
    match raw.array()? {
        Len::Len(len) if len == expected => Ok(()),
        _ => Err(Error::InvalidAddress(format!("unexpected {}", what))),
    }
}

fn address_root(xpub: &XPub, attributes: &Attributes) -> [u8; ADDRESS_ROOT_SIZE] {
    let spending_data = || -> cbor_event::Result<Vec<u8>> {
        let mut se = Serializer::new_vec();
        se.write_array(Len::Len(3))?
            .write_unsigned_integer(ADDR_TYPE_PUBKEY)?
            .write_array(Len::Len(2))?
            .write_unsigned_integer(SPENDING_DATA_PUBKEY)?
            .write_bytes(xpub.to_bytes())?;
        attributes.serialize(&mut se)?;
        Ok(se.finalize())
    };
    let encoded = spending_data().expect("serializing into a Vec cannot fail");
    let sha = Sha3_256::digest(encoded);
    let mut root = [0u8; ADDRESS_ROOT_SIZE];
    root.copy_from_slice(&Blake2b224::digest(sha));
    root
}

/// A decoded Byron address
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ByronAddress {
    root: [u8; ADDRESS_ROOT_SIZE],
    attributes: Attributes,
    addr_type: u64,
}

impl ByronAddress {
    /// The public key address of `xpub` on the network identified by `magic`
    pub fn from_xpub(xpub: &XPub, magic: ProtocolMagic) -> Self {
        let attributes = Attributes::new(magic);
        ByronAddress {
            root: address_root(xpub, &attributes),
            attributes,
            addr_type: ADDR_TYPE_PUBKEY,
        }
    }

    fn serialize_payload(&self) -> cbor_event::Result<Vec<u8>> {
        let mut se = Serializer::new_vec();
        se.write_array(Len::Len(3))?.write_bytes(self.root)?;
        self.attributes.serialize(&mut se)?.write_unsigned_integer(self.addr_type)?;
        Ok(se.finalize())
    }

    fn serialize(&self) -> cbor_event::Result<Vec<u8>> {
        let payload = self.serialize_payload()?;
        let mut se = Serializer::new_vec();
        se.write_array(Len::Len(2))?
            .write_tag(TAG_ENCODED_CBOR)?
            .write_bytes(&payload)?
            .write_unsigned_integer(crc32fast::hash(&payload) as u64)?;
        Ok(se.finalize())
    }

    /// Binary form: `[tag24(payload), crc32(payload)]`
    pub fn to_bytes(&self) -> Vec<u8> {
        self.serialize().expect("serializing into a Vec cannot fail")
    }

    /// Parse the binary form, checking structure and CRC
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (payload, crc) = decode_exact(bytes, |raw| {
            expect_array(raw, 2, "envelope")?;
            if raw.tag()? != TAG_ENCODED_CBOR {
                return Err(Error::InvalidAddress("unexpected envelope".into()));
            }
            Ok((raw.bytes()?, raw.unsigned_integer()?))
        })?;
        if crc32fast::hash(&payload) as u64 != crc {
            return Err(Error::InvalidAddress("CRC mismatch".into()));
        }

        decode_exact(&payload, |raw| {
            expect_array(raw, 3, "payload")?;
            let root_bytes = raw.bytes()?;
            let root = <[u8; ADDRESS_ROOT_SIZE]>::try_from(root_bytes.as_slice()).map_err(|_| {
                Error::InvalidAddress(format!(
                    "root must be {} bytes, got {}",
                    ADDRESS_ROOT_SIZE,
                    root_bytes.len()
                ))
            })?;
            let attributes = Attributes::deserialize(raw)?;
            let addr_type = raw.unsigned_integer()?;
            Ok(ByronAddress {
                root,
                attributes,
                addr_type,
            })
        })
    }

    /// The root hash
    pub fn root(&self) -> &[u8; ADDRESS_ROOT_SIZE] {
        &self.root
    }

    /// The attributes
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// The address type
    pub fn addr_type(&self) -> u64 {
        self.addr_type
    }

    /// Network tag carried by the address, `None` for mainnet and staging
    pub fn protocol_magic(&self) -> Option<ProtocolMagic> {
        self.attributes.protocol_magic
    }

    /// Whether this address commits to `xpub`
    pub fn is_derived_from(&self, xpub: &XPub) -> bool {
        self.addr_type == ADDR_TYPE_PUBKEY
            && address_root(xpub, &self.attributes) == self.root
    }
}

impl fmt::Display for ByronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.to_bytes()).into_string())
    }
}

impl FromStr for ByronAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| Error::InvalidAddress(format!("invalid base58: {}", e)))?;
        Self::from_bytes(&bytes)
    }
}

/// Encode the address of `xpub` on the network identified by `magic`
pub fn encode_address(xpub: &XPub, magic: ProtocolMagic) -> String {
    ByronAddress::from_xpub(xpub, magic).to_string()
}
