/*!
 * Custom image wrapper types for Homelink.
 *
 * Plugins can ship custom icons as zip files in the host's standard format,
 * placed in the folder with the plugin itself. Loaded images live in the
 * host's image table.
 */
use serde::{Deserialize, Serialize};

use crate::runtime::{Result, SharedHost};

/// A mirror of the host's record for one custom image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Image ID in the host's custom image table
    pub id: i64,
    /// Name as specified in the upload file
    pub name: String,
    /// Base name; must start with the plugin key or the host refuses the file
    pub base: String,
    /// Description as specified in the upload file
    pub description: String,
}

/// A pass-through handle to a custom image on the host
#[derive(Debug, Clone)]
pub struct ImageHandle {
    host: SharedHost,
    record: ImageRecord,
}

impl ImageHandle {
    /// Load an image zip file into the host's image table
    pub fn create(host: SharedHost, filename: &str) -> Result<Self> {
        let record = host.create_image(filename)?;
        Ok(Self { host, record })
    }

    /// Image ID in the host's custom image table
    pub fn id(&self) -> i64 {
        self.record.id
    }

    /// Name as specified in the upload file
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Base name of the image
    pub fn base(&self) -> &str {
        &self.record.base
    }

    /// Description as specified in the upload file
    pub fn description(&self) -> &str {
        &self.record.description
    }

    /// The full record mirror
    pub fn record(&self) -> &ImageRecord {
        &self.record
    }

    /// Delete the image from the host's image table
    ///
    /// The host removes the record immediately; local mirrors are unchanged.
    pub fn delete(self) -> Result<()> {
        self.host.delete_image(&self.record.name)
    }
}
