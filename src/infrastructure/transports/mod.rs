pub mod http;

use crate::domain::models::TransportBox;

pub struct TransportManager {}

impl TransportManager {
    pub fn get() -> TransportBox {
        return Box::<http::HttpTransport>::default();
    }
}
