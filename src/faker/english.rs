//! English fake-data catalog backed by the `fake` crate.

use super::{FakerCatalog, FakerCatalogBuilder};
use crate::value::TemplateValue;
use fake::faker::address::en::{CityName, CountryName, StreetName, ZipCode};
use fake::faker::boolean::en::Boolean;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{DomainSuffix, SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use uuid::Uuid;

/// Registers a generator producing `String`s from a `fake` dummy.
fn text<F>(builder: FakerCatalogBuilder, path: &str, generate: F) -> FakerCatalogBuilder
where
    F: Fn() -> String + Send + Sync + 'static,
{
    builder.generator(path, move || TemplateValue::String(generate()))
}

pub(super) fn catalog() -> FakerCatalog {
    let builder = FakerCatalog::builder();

    let builder = text(builder, "name.firstName", || FirstName().fake());
    let builder = text(builder, "name.lastName", || LastName().fake());
    let builder = text(builder, "name.fullName", || Name().fake());

    let builder = text(builder, "internet.email", || SafeEmail().fake());
    let builder = text(builder, "internet.userName", || Username().fake());
    let builder = text(builder, "internet.domainSuffix", || DomainSuffix().fake());

    let builder = text(builder, "phone.number", || PhoneNumber().fake());

    let builder = text(builder, "address.city", || CityName().fake());
    let builder = text(builder, "address.country", || CountryName().fake());
    let builder = text(builder, "address.streetName", || StreetName().fake());
    let builder = text(builder, "address.zipCode", || ZipCode().fake());

    let builder = text(builder, "company.name", || CompanyName().fake());

    let builder = text(builder, "lorem.word", || Word().fake());
    let builder = text(builder, "lorem.sentence", || Sentence(3..8).fake());
    let builder = text(builder, "lorem.paragraph", || Paragraph(2..4).fake());

    let builder = text(builder, "datatype.uuid", || Uuid::new_v4().to_string());

    builder
        .generator("datatype.boolean", || {
            TemplateValue::Bool(Boolean(50).fake())
        })
        .generator("datatype.number", || {
            TemplateValue::from((0..100_000).fake::<i64>())
        })
        .build()
}
