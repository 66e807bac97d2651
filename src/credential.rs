//! Identity used to sign requests sent to Stark Bank.

use crate::{client::Environment, Error};
use openssl::{
    ec::EcKey,
    pkey::{Private, Public},
};
use secrecy::{ExposeSecret, Secret};
use std::fmt;

/// Caller identity: who is talking to the API, with which key, and against which environment.
///
/// The private key is kept in a [`secrecy::Secret`](secrecy::Secret) so it never shows up in
/// `Debug` output and the backing memory is wiped on drop.
#[derive(Clone)]
pub enum Credential {
    /// A project created inside a workspace.
    Project {
        id: String,
        private_key: Secret<String>,
        environment: Environment,
    },
    /// An organization, optionally acting on behalf of one of its workspaces.
    Organization {
        id: String,
        private_key: Secret<String>,
        environment: Environment,
        workspace_id: Option<String>,
    },
}

impl Credential {
    /// Builds a project credential, validating that `private_key_pem` is an EC private key.
    pub fn project(
        id: impl Into<String>,
        private_key_pem: impl Into<String>,
        environment: Environment,
    ) -> Result<Self, Error> {
        let private_key = validated_key(private_key_pem.into())?;
        Ok(Credential::Project {
            id: id.into(),
            private_key,
            environment,
        })
    }

    /// Builds an organization credential, validating that `private_key_pem` is an EC private key.
    pub fn organization(
        id: impl Into<String>,
        private_key_pem: impl Into<String>,
        environment: Environment,
        workspace_id: Option<String>,
    ) -> Result<Self, Error> {
        let private_key = validated_key(private_key_pem.into())?;
        Ok(Credential::Organization {
            id: id.into(),
            private_key,
            environment,
            workspace_id,
        })
    }

    /// Value of the `Access-Id` header for this credential.
    pub fn access_id(&self) -> String {
        match self {
            Credential::Project { id, .. } => format!("project/{}", id),
            Credential::Organization {
                id,
                workspace_id: Some(workspace_id),
                ..
            } => format!("organization/{}/workspace/{}", id, workspace_id),
            Credential::Organization { id, .. } => format!("organization/{}", id),
        }
    }

    /// Environment this credential belongs to.
    pub fn environment(&self) -> &Environment {
        match self {
            Credential::Project { environment, .. }
            | Credential::Organization { environment, .. } => environment,
        }
    }

    pub(crate) fn signing_key(&self) -> Result<EcKey<Private>, Error> {
        let pem = match self {
            Credential::Project { private_key, .. }
            | Credential::Organization { private_key, .. } => private_key,
        };
        parse_private_key(pem.expose_secret())
    }

    /// Public half of the signing key, PEM encoded. This is what gets registered on Stark Bank.
    pub fn public_key_pem(&self) -> Result<String, Error> {
        let key = self.signing_key()?;
        let public = EcKey::<Public>::from_public_key(key.group(), key.public_key())?;
        let pem = public.public_key_to_pem()?;
        String::from_utf8(pem).map_err(|e| Error::Other(e.into()))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_id", &self.access_id())
            .field("environment", self.environment())
            .finish_non_exhaustive()
    }
}

fn validated_key(pem: String) -> Result<Secret<String>, Error> {
    parse_private_key(&pem)?;
    Ok(Secret::new(pem))
}

fn parse_private_key(pem: &str) -> Result<EcKey<Private>, Error> {
    EcKey::private_key_from_pem(pem.as_bytes())
        .map_err(|_| Error::InvalidCredential("private key must be a PEM encoded EC key".into()))
}
