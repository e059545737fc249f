pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "WARDEN_DATABASE__URL";
    pub const JWT_SECRET_ENV_VAR: &str = "WARDEN_SESSION__JWT_SECRET";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "WARDEN_EMAIL_CLIENT__AUTHORIZATION_TOKEN";
    pub const SITE_BASE_URL_ENV_VAR: &str = "WARDEN_APPLICATION__SITE_BASE_URL";
}

pub mod prod {
    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
