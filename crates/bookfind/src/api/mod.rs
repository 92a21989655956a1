use log::trace;
use serde::de::DeserializeOwned;

pub(crate) mod abebooks;
pub(crate) mod google_books;
pub(crate) mod open_library;

/// The transport used by the lookup services.
///
/// Any response outside of the 2xx range is reported as an [`ErrorKind::Status`] error.
pub trait Client
where
    Self: Default,
{
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;

    fn post_form_json<T>(&self, url: &str, form: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(check_status)
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }

    fn post_form_json<T>(&self, url: &str, form: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.post(url)
            .form(form)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(check_status)
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }
}

fn check_status(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, Error> {
    let status = resp.status();
    trace!("Response status was {status}");

    if status.is_success() {
        Ok(resp)
    } else {
        Err(Error::new(
            ErrorKind::Status,
            format!("{} responded with {status}", resp.url()),
        ))
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_form, assert_url, impl_text_producer, MockClient, NetworkErrorProducer,
    NotFoundProducer, Producer, FORM_SINK, URL_SINK,
};

use crate::{Error, ErrorKind};
