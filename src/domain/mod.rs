//! Domain layer: strong types with validation and invariants (no I/O).

mod allow_list;
mod request;
mod response;
mod validation;
mod value;

pub use allow_list::AllowList;
pub use request::{SendMessageRequest, TEXT_FIELD, TO_FIELD};
pub use response::{ProviderError, SendMessageResponse, SendOutcome};
pub use validation::{PhoneParseError, ValidationError};
pub use value::{
    COUNTRY_PREFIX, Credentials, DEFAULT_REGION, MAX_PHONE_LENGTH, normalize_phone_number,
    normalize_phone_numbers,
};
