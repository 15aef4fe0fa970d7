//! Shared primitives for the mentor workspace crates.
//!
//! ```rust
//! use mcommon::GenerationOptions;
//!
//! let options = GenerationOptions::default().with_temperature(0.3);
//! assert_eq!(options.temperature, 0.3);
//! assert_eq!(options.max_output_tokens, 800);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use mcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod model {
    //! Generation settings embedded in every outgoing request.
    //!
    //! ```rust
    //! use mcommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::default()
    //!     .with_temperature(0.2)
    //!     .with_max_output_tokens(128);
    //!
    //! assert_eq!(options.temperature, 0.2);
    //! assert_eq!(options.max_output_tokens, 128);
    //! assert!(options.check().is_ok());
    //! ```

    pub const DEFAULT_TEMPERATURE: f64 = 0.7;
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 800;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GenerationOptions {
        pub temperature: f64,
        pub max_output_tokens: u32,
    }

    impl Default for GenerationOptions {
        fn default() -> Self {
            Self {
                temperature: DEFAULT_TEMPERATURE,
                max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            }
        }
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f64) -> Self {
            self.temperature = temperature;
            self
        }

        pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
            self.max_output_tokens = max_output_tokens;
            self
        }

        /// Returns a description of the first out-of-range value, if any.
        pub fn check(&self) -> Result<(), &'static str> {
            if !(0.0..=2.0).contains(&self.temperature) {
                return Err("temperature must be in the inclusive range 0.0..=2.0");
            }

            if self.max_output_tokens == 0 {
                return Err("max_output_tokens must be greater than zero");
            }

            Ok(())
        }
    }
}

pub use future::BoxFuture;
pub use model::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, GenerationOptions};

#[cfg(test)]
mod tests {
    use super::GenerationOptions;

    #[test]
    fn generation_options_default_to_documented_values() {
        let options = GenerationOptions::default();

        assert_eq!(options.temperature, 0.7);
        assert_eq!(options.max_output_tokens, 800);
        assert!(options.check().is_ok());
    }

    #[test]
    fn generation_options_builder_helpers_set_values() {
        let options = GenerationOptions::default()
            .with_temperature(0.3)
            .with_max_output_tokens(123);

        assert_eq!(options.temperature, 0.3);
        assert_eq!(options.max_output_tokens, 123);
    }

    #[test]
    fn generation_options_check_rejects_out_of_range_values() {
        let hot = GenerationOptions::default().with_temperature(2.5);
        assert!(hot.check().is_err());

        let negative = GenerationOptions::default().with_temperature(-0.1);
        assert!(negative.check().is_err());

        let capped = GenerationOptions::default().with_max_output_tokens(0);
        assert!(capped.check().is_err());
    }
}
