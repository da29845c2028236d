use std::sync::Arc;

use helpdesk_config::Config;
use helpdesk_core_contact_impl::ContactFeatureConfig;
use helpdesk_di::provider;
use types::Email;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        email: Email,
        ..config: ConfigProvider {
            ContactFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self {
            _instances: Default::default(),
            email,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        contact_feature_config: ContactFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        let contact_feature_config = ContactFeatureConfig {
            recipient: Arc::new(config.contact.email.clone().into()),
        };

        Self {
            _instances: Default::default(),
            contact_feature_config,
        }
    }
}
