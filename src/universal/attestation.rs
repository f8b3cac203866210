/// Why an attestation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AttestationError {
    /// Message, signature or public key is empty.
    #[error("malformed attestation input: {0} is empty")]
    MalformedInput(&'static str),
    /// The signature does not verify over the message under the public key.
    #[error("attestation signature is invalid")]
    SignatureInvalid,
}

/// Verifies that `signature` binds `message` to `public_key`.
///
/// The admission guard only depends on this trait, so a post-quantum scheme
/// can be plugged in without touching the guard. Implementations must be pure
/// and bounded in time: no I/O and no retries.
pub trait AttestationVerifier: Send + Sync {
    fn name(&self) -> &'static str;
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<(), AttestationError>;
}

/// Structural precondition shared by every verifier: none of the inputs may be empty.
pub fn check_structure(message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<(), AttestationError> {
    if message.is_empty() {
        return Err(AttestationError::MalformedInput("message"));
    }
    if signature.is_empty() {
        return Err(AttestationError::MalformedInput("signature"));
    }
    if public_key.is_empty() {
        return Err(AttestationError::MalformedInput("public_key"));
    }
    Ok(())
}

/// Placeholder verifier that only enforces [`check_structure`].
///
/// NOTE: this performs no cryptographic verification and accepts any
/// non-empty signature. Production deployments must supply a real
/// [`AttestationVerifier`] that returns [`AttestationError::SignatureInvalid`]
/// for signatures that do not verify.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralVerifier;

impl AttestationVerifier for StructuralVerifier {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<(), AttestationError> {
        check_structure(message, signature, public_key)
    }
}

/// Wraps a signature-check closure behind the structural precondition.
///
/// The closure only sees non-empty inputs and returns whether the signature
/// is valid; `false` maps to [`AttestationError::SignatureInvalid`].
pub struct SchemeVerifier<F> {
    name: &'static str,
    check: F,
}

impl<F> SchemeVerifier<F>
where
    F: Fn(&[u8], &[u8], &[u8]) -> bool + Send + Sync,
{
    pub fn new(name: &'static str, check: F) -> Self {
        Self { name, check }
    }
}

impl<F> AttestationVerifier for SchemeVerifier<F>
where
    F: Fn(&[u8], &[u8], &[u8]) -> bool + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn verify(&self, message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<(), AttestationError> {
        check_structure(message, signature, public_key)?;
        if (self.check)(message, signature, public_key) {
            Ok(())
        } else {
            Err(AttestationError::SignatureInvalid)
        }
    }
}
