//! Applications and the microservices they are made of.

use std::fmt;

use serde::{Deserialize, Serialize};

use tiergrid_resource::ResourceProfile;

use crate::ServiceId;

/// Reference to a deployable artifact image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub name: String,
    pub version: String,
}

impl ImageRef {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}

/// One deployable service: an image and its minimum resource demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Microservice {
    pub id: ServiceId,
    pub image: ImageRef,
    /// Minimum required capacity per resource kind.
    pub requirements: ResourceProfile,
}

impl Microservice {
    pub fn new(id: impl Into<ServiceId>, image: ImageRef, requirements: ResourceProfile) -> Self {
        Self {
            id: id.into(),
            image,
            requirements,
        }
    }
}

/// A set of microservices deployed together.
///
/// Order matters: services claim resources in the order they appear, so
/// the first service has first claim under contention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    pub services: Vec<Microservice>,
}

impl Application {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            services: Vec::new(),
        }
    }

    /// Append a service, consuming and returning the application.
    pub fn with_service(mut self, service: Microservice) -> Self {
        self.services.push(service);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }
}
