use log::{info, trace, warn};
use serde::{Deserialize, Deserializer};

use crate::{isbn::Isbn, record::PriceQuote, Error, ErrorKind};

use super::Client;

const ABEBOOKS_PRICING_URL: &str = "https://www.abebooks.com/servlet/DWRestService/pricingservice";
const PRICING_ACTION: &str = "getPricingDataByISBN";

/// Looks up the best new and used prices, any failure is logged and results in an empty quote.
pub(crate) fn fetch_price<C: Client>(isbn: &Isbn) -> PriceQuote {
    get_price_quote::<C>(isbn).unwrap_or_else(|err| {
        warn!("No prices for ISBN '{isbn}': {err}");
        PriceQuote::default()
    })
}

pub(crate) fn get_price_quote<C: Client>(isbn: &Isbn) -> Result<PriceQuote, Error> {
    info!("Searching for prices of ISBN '{isbn}' using the AbeBooks pricing service");
    let container = format!("pricingService-{isbn}");
    let form = [
        ("action", PRICING_ACTION),
        ("isbn", isbn.as_str()),
        ("container", container.as_str()),
    ];

    let client = C::default();
    let pricing: PricingModel = client.post_form_json(ABEBOOKS_PRICING_URL, &form)?;

    if !pricing.success {
        return Err(Error::new(
            ErrorKind::NoValue,
            "Pricing service reported no success",
        ));
    }

    trace!("Request was successful");
    Ok(PriceQuote::from(pricing))
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(rename_all = "camelCase")]
struct PricingModel {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    pricing_info_for_best_new: Option<PricingInfo>,
    #[serde(default)]
    pricing_info_for_best_used: Option<PricingInfo>,
}

/// Pricing of the best offer, the amounts are sent either as strings or numbers.
#[derive(Deserialize, Default)]
#[cfg_attr(test, derive(Debug))]
struct PricingInfo {
    #[serde(
        rename = "bestPriceInPurchaseCurrencyValueOnly",
        default,
        deserialize_with = "amount"
    )]
    price: Option<f64>,
    #[serde(
        rename = "bestShippingToDestinationPriceInPurchaseCurrencyValueOnly",
        default,
        deserialize_with = "amount"
    )]
    shipping: Option<f64>,
    #[serde(rename = "shippingDestinationNameInSurferLanguage", default)]
    destination: Option<String>,
}

impl PricingInfo {
    fn total(&self) -> Option<f64> {
        self.price
            .map(|price| round_cents(price + self.shipping.unwrap_or_default()))
            .filter(|total| total.is_finite())
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    let amount = match Option::<Amount>::deserialize(deserializer)? {
        Some(Amount::Number(n)) => Some(n),
        Some(Amount::Text(s)) => s.trim().parse().ok(),
        None => None,
    };

    // "NaN", "inf" and out of range values parse as floats but are no price
    Ok(amount.filter(|n: &f64| n.is_finite()))
}

impl From<PricingModel> for PriceQuote {
    fn from(pricing: PricingModel) -> Self {
        let PricingModel {
            pricing_info_for_best_new: best_new,
            pricing_info_for_best_used: best_used,
            ..
        } = pricing;

        let new = best_new.as_ref().and_then(PricingInfo::total);
        let used = best_used.as_ref().and_then(PricingInfo::total);

        // the used offer wins the destination when both offers are present
        let destination = best_used
            .and_then(|info| info.destination)
            .or_else(|| best_new.and_then(|info| info.destination));

        Self {
            new,
            used,
            destination,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::{PricingInfo, PricingModel};
    use crate::{
        api::{assert_form, assert_url, impl_text_producer, MockClient, NotFoundProducer},
        isbn::Isbn,
        record::PriceQuote,
        ErrorKind,
    };

    const PRICING_JSON: &str = include_str!("../../tests/data/abebooks_pricing.json");

    impl_text_producer! {
        ValidJsonProducer => Ok(PRICING_JSON.to_owned()),
        FailedPricingProducer => Ok(
            r#"{
                "success": false,
                "errorTexts": ["No pricing data available"]
            }"#.to_owned()
        ),
        NewOnlyProducer => Ok(
            r#"{
                "success": true,
                "pricingInfoForBestNew": {
                    "bestPriceInPurchaseCurrencyValueOnly": "20",
                    "shippingDestinationNameInSurferLanguage": "Canada"
                },
                "pricingInfoForBestUsed": null
            }"#.to_owned()
        ),
    }

    fn isbn() -> Isbn {
        "9780735619678".parse().unwrap()
    }

    #[test]
    fn request_posts_pricing_form() {
        super::get_price_quote::<MockClient<ValidJsonProducer>>(&isbn()).unwrap();

        assert_url!("https://www.abebooks.com/servlet/DWRestService/pricingservice");
        assert_form! {
            "action" => "getPricingDataByISBN",
            "isbn" => "9780735619678",
            "container" => "pricingService-9780735619678",
        };
    }

    #[test]
    fn prices_include_shipping() {
        let quote = super::fetch_price::<MockClient<ValidJsonProducer>>(&isbn());

        assert_eq!(Some(15.75), quote.new);
        assert_eq!(Some(8.08), quote.used);
    }

    #[test]
    fn used_destination_overwrites_new_destination() {
        let quote = super::fetch_price::<MockClient<ValidJsonProducer>>(&isbn());
        assert_eq!(Some("United States"), quote.destination.as_deref());
    }

    #[test]
    fn new_offer_alone_provides_destination() {
        let quote = super::fetch_price::<MockClient<NewOnlyProducer>>(&isbn());

        assert_eq!(Some(20.0), quote.new);
        assert_eq!(None, quote.used);
        assert_eq!(Some("Canada"), quote.destination.as_deref());
    }

    #[test]
    fn unsuccessful_pricing_is_no_value() {
        let err = super::get_price_quote::<MockClient<FailedPricingProducer>>(&isbn())
            .expect_err("success is false");
        assert_eq!(ErrorKind::NoValue, err.kind());
    }

    #[test]
    fn unsuccessful_pricing_degrades_to_empty_quote() {
        let quote = super::fetch_price::<MockClient<FailedPricingProducer>>(&isbn());
        assert_eq!(PriceQuote::default(), quote);
    }

    #[test]
    fn non_success_status_degrades_to_empty_quote() {
        let quote = super::fetch_price::<MockClient<NotFoundProducer>>(&isbn());
        assert!(quote.is_empty());
    }

    #[test]
    fn total_is_rounded_to_two_decimals() {
        let info = PricingInfo {
            price: Some(12.5),
            shipping: Some(3.25),
            destination: None,
        };
        assert_eq!(Some(15.75), info.total());

        let info = PricingInfo {
            price: Some(0.1),
            shipping: Some(0.2),
            destination: None,
        };
        assert_eq!(Some(0.3), info.total());
    }

    #[test]
    fn missing_item_price_is_absent() {
        let info = PricingInfo {
            price: None,
            shipping: Some(3.25),
            destination: Some("U.S.A.".to_owned()),
        };
        assert_eq!(None, info.total());
    }

    #[test]
    fn unparsable_amount_is_absent() {
        let model: PricingModel = serde_json::from_str(
            r#"{
                "success": true,
                "pricingInfoForBestNew": {
                    "bestPriceInPurchaseCurrencyValueOnly": "n/a"
                }
            }"#,
        )
        .unwrap();

        let quote = PriceQuote::from(model);
        assert_eq!(None, quote.new);
    }

    #[test]
    fn non_finite_amounts_are_absent() {
        let model: PricingModel = serde_json::from_str(
            r#"{
                "success": true,
                "pricingInfoForBestNew": {
                    "bestPriceInPurchaseCurrencyValueOnly": "NaN"
                },
                "pricingInfoForBestUsed": {
                    "bestPriceInPurchaseCurrencyValueOnly": "inf",
                    "bestShippingToDestinationPriceInPurchaseCurrencyValueOnly": "1e400"
                }
            }"#,
        )
        .unwrap();

        let quote = PriceQuote::from(model);
        assert_eq!(None, quote.new);
        assert_eq!(None, quote.used);
    }

    #[test]
    fn non_finite_shipping_counts_as_missing() {
        let model: PricingModel = serde_json::from_str(
            r#"{
                "success": true,
                "pricingInfoForBestNew": {
                    "bestPriceInPurchaseCurrencyValueOnly": "12.5",
                    "bestShippingToDestinationPriceInPurchaseCurrencyValueOnly": "-inf"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(Some(12.5), PriceQuote::from(model).new);
    }

    #[test]
    fn used_offer_without_destination_falls_back_to_new() {
        let model: PricingModel = serde_json::from_str(
            r#"{
                "success": true,
                "pricingInfoForBestNew": {
                    "bestPriceInPurchaseCurrencyValueOnly": "20",
                    "shippingDestinationNameInSurferLanguage": "Canada"
                },
                "pricingInfoForBestUsed": {
                    "bestPriceInPurchaseCurrencyValueOnly": "5"
                }
            }"#,
        )
        .unwrap();

        let quote = PriceQuote::from(model);
        assert_eq!(Some(5.0), quote.used);
        assert_eq!(Some("Canada"), quote.destination.as_deref());
    }
}
