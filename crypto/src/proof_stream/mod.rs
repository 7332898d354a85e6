// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::marker::PhantomData;

use math::FieldElement;
use utils::{
    ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable, SliceReader,
};

use crate::{errors::ProofStreamError, hash::Hasher};


// PROOF OBJECT
// ================================================================================================

/// A single item of a proof transcript.
///
/// Every object is encoded as a one-byte tag followed by its payload; vectors are prefixed with
/// their length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofObject<E, D> {
    Digest(D),
    Path(Vec<D>),
    Element(E),
    Codeword(Vec<E>),
    Triplet(E, E, E),
}

const DIGEST_TAG: u8 = 0;
const PATH_TAG: u8 = 1;
const ELEMENT_TAG: u8 = 2;
const CODEWORD_TAG: u8 = 3;
const TRIPLET_TAG: u8 = 4;

impl<E, D> ProofObject<E, D> {
    /// Returns a short name of this object's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Digest(_) => "digest",
            Self::Path(_) => "path",
            Self::Element(_) => "element",
            Self::Codeword(_) => "codeword",
            Self::Triplet(..) => "triplet",
        }
    }
}

impl<E: Serializable, D: Serializable> Serializable for ProofObject<E, D> {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        match self {
            Self::Digest(digest) => {
                target.write_u8(DIGEST_TAG);
                target.write(digest);
            },
            Self::Path(path) => {
                target.write_u8(PATH_TAG);
                target.write_usize(path.len());
                target.write_many(path);
            },
            Self::Element(element) => {
                target.write_u8(ELEMENT_TAG);
                target.write(element);
            },
            Self::Codeword(codeword) => {
                target.write_u8(CODEWORD_TAG);
                target.write_usize(codeword.len());
                target.write_many(codeword);
            },
            Self::Triplet(a, b, c) => {
                target.write_u8(TRIPLET_TAG);
                target.write(a);
                target.write(b);
                target.write(c);
            },
        }
    }
}

impl<E: Deserializable, D: Deserializable> Deserializable for ProofObject<E, D> {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        match source.read_u8()? {
            DIGEST_TAG => Ok(Self::Digest(source.read()?)),
            PATH_TAG => {
                let len = source.read_usize()?;
                Ok(Self::Path(source.read_many(len)?))
            },
            ELEMENT_TAG => Ok(Self::Element(source.read()?)),
            CODEWORD_TAG => {
                let len = source.read_usize()?;
                Ok(Self::Codeword(source.read_many(len)?))
            },
            TRIPLET_TAG => Ok(Self::Triplet(source.read()?, source.read()?, source.read()?)),
            tag => Err(DeserializationError::InvalidValue(format!(
                "unknown proof object tag {tag}"
            ))),
        }
    }
}

// PROOF STREAM
// ================================================================================================

/// An ordered transcript of proof objects exchanged between a prover and a verifier.
///
/// The prover appends objects with [push()](ProofStream::push) and derives challenges from
/// everything written so far via [prover_fiat_shamir()](ProofStream::prover_fiat_shamir). The
/// verifier reads the same objects back with [pull()](ProofStream::pull) and its typed variants,
/// deriving challenges from the objects read so far via
/// [verifier_fiat_shamir()](ProofStream::verifier_fiat_shamir). As long as both parties process
/// the same objects in the same order, they derive the same challenges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStream<E: FieldElement, H: Hasher> {
    objects: Vec<ProofObject<E, H::Digest>>,
    read_index: usize,
    _hasher: PhantomData<H>,
}

impl<E: FieldElement, H: Hasher> ProofStream<E, H> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns an empty proof stream.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            read_index: 0,
            _hasher: PhantomData,
        }
    }

    // WRITING
    // --------------------------------------------------------------------------------------------

    /// Appends an object to the end of this stream.
    pub fn push(&mut self, object: ProofObject<E, H::Digest>) {
        self.objects.push(object);
    }

    pub fn push_digest(&mut self, digest: H::Digest) {
        self.push(ProofObject::Digest(digest));
    }

    pub fn push_path(&mut self, path: Vec<H::Digest>) {
        self.push(ProofObject::Path(path));
    }

    pub fn push_element(&mut self, element: E) {
        self.push(ProofObject::Element(element));
    }

    pub fn push_codeword(&mut self, codeword: Vec<E>) {
        self.push(ProofObject::Codeword(codeword));
    }

    pub fn push_triplet(&mut self, a: E, b: E, c: E) {
        self.push(ProofObject::Triplet(a, b, c));
    }

    // READING
    // --------------------------------------------------------------------------------------------

    /// Returns the next unread object and advances the read cursor.
    ///
    /// # Errors
    /// Returns an error if all objects have already been read.
    pub fn pull(&mut self) -> Result<ProofObject<E, H::Digest>, ProofStreamError> {
        let object = self.objects.get(self.read_index).cloned().ok_or_else(|| {
            ProofStreamError::ProtocolViolation(format!(
                "attempted to read object {} from a stream of {} objects",
                self.read_index,
                self.objects.len()
            ))
        })?;
        self.read_index += 1;
        Ok(object)
    }

    /// Reads the next object, requiring it to be a digest.
    pub fn pull_digest(&mut self) -> Result<H::Digest, ProofStreamError> {
        match self.pull()? {
            ProofObject::Digest(digest) => Ok(digest),
            other => Err(unexpected_object("digest", &other)),
        }
    }

    /// Reads the next object, requiring it to be an authentication path.
    pub fn pull_path(&mut self) -> Result<Vec<H::Digest>, ProofStreamError> {
        match self.pull()? {
            ProofObject::Path(path) => Ok(path),
            other => Err(unexpected_object("path", &other)),
        }
    }

    /// Reads the next object, requiring it to be a field element.
    pub fn pull_element(&mut self) -> Result<E, ProofStreamError> {
        match self.pull()? {
            ProofObject::Element(element) => Ok(element),
            other => Err(unexpected_object("element", &other)),
        }
    }

    /// Reads the next object, requiring it to be a codeword.
    pub fn pull_codeword(&mut self) -> Result<Vec<E>, ProofStreamError> {
        match self.pull()? {
            ProofObject::Codeword(codeword) => Ok(codeword),
            other => Err(unexpected_object("codeword", &other)),
        }
    }

    /// Reads the next object, requiring it to be a triplet of field elements.
    pub fn pull_triplet(&mut self) -> Result<(E, E, E), ProofStreamError> {
        match self.pull()? {
            ProofObject::Triplet(a, b, c) => Ok((a, b, c)),
            other => Err(unexpected_object("triplet", &other)),
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns all objects of this stream.
    pub fn objects(&self) -> &[ProofObject<E, H::Digest>] {
        &self.objects
    }

    /// Returns the number of objects in this stream.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if this stream contains no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the number of objects which have already been read.
    pub fn read_index(&self) -> usize {
        self.read_index
    }

    // FIAT-SHAMIR
    // --------------------------------------------------------------------------------------------

    /// Returns a hash of the serialization of all objects in this stream.
    pub fn prover_fiat_shamir(&self) -> H::Digest {
        hash_objects::<E, H>(&self.objects)
    }

    /// Returns a hash of the serialization of the objects which have been read so far.
    pub fn verifier_fiat_shamir(&self) -> H::Digest {
        hash_objects::<E, H>(&self.objects[..self.read_index])
    }

    // SERIALIZATION / DESERIALIZATION
    // --------------------------------------------------------------------------------------------

    /// Serializes all objects of this stream into a vector of bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();
        write_objects(&self.objects, &mut result);
        result
    }

    /// Returns a stream deserialized from the provided bytes, with its read cursor at the start.
    ///
    /// # Errors
    /// Returns an error if the bytes do not encode a valid sequence of proof objects, or if some
    /// bytes remain unconsumed.
    pub fn from_bytes(source: &[u8]) -> Result<Self, DeserializationError> {
        let mut reader = SliceReader::new(source);
        let num_objects = reader.read_usize()?;
        let objects = reader.read_many(num_objects)?;
        if reader.has_more_bytes() {
            return Err(DeserializationError::UnconsumedBytes);
        }

        Ok(Self {
            objects,
            read_index: 0,
            _hasher: PhantomData,
        })
    }
}

impl<E: FieldElement, H: Hasher> Default for ProofStream<E, H> {
    fn default() -> Self {
        Self::new()
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn write_objects<E: FieldElement, D: Serializable, W: ByteWriter>(
    objects: &[ProofObject<E, D>],
    target: &mut W,
) {
    target.write_usize(objects.len());
    target.write_many(objects);
}

fn hash_objects<E: FieldElement, H: Hasher>(objects: &[ProofObject<E, H::Digest>]) -> H::Digest {
    let mut bytes = Vec::new();
    write_objects(objects, &mut bytes);
    H::hash(&bytes)
}

fn unexpected_object<E, D>(expected: &str, found: &ProofObject<E, D>) -> ProofStreamError {
    ProofStreamError::ProtocolViolation(format!(
        "expected {expected} but found {}",
        found.kind()
    ))
}
