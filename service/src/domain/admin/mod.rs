//! [`Admin`] definitions.

pub mod session;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rand::RngCore as _;
use secrecy::{zeroize::Zeroize, CloneableSecret, ExposeSecret as _, SecretBox};
use serde::{Deserialize, Serialize};
use sha2::{digest, Digest as _, Sha256};
use subtle::ConstantTimeEq as _;
use uuid::Uuid;

pub use self::session::{Gate, Session};
use super::contact::Email;

/// Back office administrator.
///
/// Every [`Admin`] has full access to the back office.
#[derive(Clone, Debug)]
pub struct Admin {
    /// ID of this [`Admin`].
    pub id: Id,

    /// [`Email`] this [`Admin`] signs in with.
    pub email: Email,

    /// [`PasswordHash`] of this [`Admin`].
    pub password_hash: PasswordHash,

    /// [`DateTime`] when this [`Admin`] was created.
    pub created_at: CreationDateTime,
}

/// ID of an [`Admin`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Password of an [`Admin`].
#[derive(Clone, Debug, Display, Eq, From, PartialEq)]
#[from(&str, String)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        password.len() >= 8 && password.len() <= 128
    }
}

impl std::str::FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Salted hash of a [`Password`], stored as `{salt}${digest}` in hex.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Length of a salt in bytes.
    const SALT_LEN: usize = 16;

    /// Creates a new [`PasswordHash`] from the given [`Password`] with a
    /// random salt.
    #[must_use]
    pub fn new(password: &SecretBox<Password>) -> Self {
        let mut salt = [0; Self::SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let digest = Self::digest(&salt, password);
        Self(format!("{}${}", hex::encode(salt), hex::encode(digest)))
    }

    /// Checks whether the given [`Password`] matches this [`PasswordHash`].
    ///
    /// Digests are compared in constant time.
    #[must_use]
    pub fn verify(&self, password: &SecretBox<Password>) -> bool {
        let Some((salt, expected)) = self.0.split_once('$') else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (hex::decode(salt), hex::decode(expected))
        else {
            return false;
        };
        Self::digest(&salt, password).as_slice().ct_eq(&expected).into()
    }

    /// Digests the given [`Password`] with the provided `salt`.
    fn digest(
        salt: &[u8],
        password: &SecretBox<Password>,
    ) -> digest::Output<Sha256> {
        Sha256::new()
            .chain_update(salt)
            .chain_update(password.expose_secret().0.as_bytes())
            .finalize()
    }
}

/// [`DateTime`] when an [`Admin`] was created.
pub type CreationDateTime = DateTimeOf<(Admin, unit::Creation)>;

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use super::{Password, PasswordHash};

    fn secret(s: &str) -> SecretBox<Password> {
        SecretBox::new(Box::new(Password::new(s).unwrap()))
    }

    #[test]
    fn verifies_hashed_password() {
        let hash = PasswordHash::new(&secret("correct horse"));

        assert!(hash.verify(&secret("correct horse")));
        assert!(!hash.verify(&secret("wrong horse!")));
    }

    #[test]
    fn salts_every_hash() {
        assert_ne!(
            PasswordHash::new(&secret("correct horse")),
            PasswordHash::new(&secret("correct horse")),
        );
    }

    #[test]
    fn rejects_malformed_hash() {
        assert!(!PasswordHash("nohash".into()).verify(&secret("password1")));
        assert!(!PasswordHash("zz$00".into()).verify(&secret("password1")));
        assert!(!PasswordHash("00$zz".into()).verify(&secret("password1")));
    }

    #[test]
    fn rejects_tampered_digest() {
        let hash = PasswordHash::new(&secret("correct horse"));
        let (salt, digest) = hash.0.split_once('$').unwrap();

        let mut flipped = hex::decode(digest).unwrap();
        flipped[0] ^= 1;
        let tampered = PasswordHash(format!("{salt}${}", hex::encode(flipped)));
        assert!(!tampered.verify(&secret("correct horse")));

        let truncated = PasswordHash(format!("{salt}${}", &digest[..62]));
        assert!(!truncated.verify(&secret("correct horse")));

        let extended = PasswordHash(format!("{salt}${digest}00"));
        assert!(!extended.verify(&secret("correct horse")));
    }

    #[test]
    fn password_length_is_checked() {
        assert!(Password::new("short").is_none());
        assert!(Password::new("long enough").is_some());
    }
}
