use super::utils::{listing, mannerheimintie};
use crate::domain::Locale;
use crate::mapper::LinearMapper;
use crate::normalize::EnergyCertificateStatus;
use crate::validate::validate_property;
use serde_json::json;
use std::collections::HashSet;

#[test]
fn maps_basic_apartment() {
    let mut mapper = LinearMapper::new();
    let property = mapper.map(&mannerheimintie("x", "00100"), Locale::Fi);

    assert_eq!(property.id, "x");
    assert_eq!(property.slug, "mannerheimintie-1");
    assert_eq!(property.address.fi, "Mannerheimintie 1");
    assert_eq!(property.city.fi, "Helsinki");
    assert_eq!(property.postal_code, "00100");
    assert_eq!(property.pricing.sales, Some(500_000.0));
    assert_eq!(property.pricing.debt_free, Some(650_000.0));
    assert_eq!(property.pricing.debt, Some(150_000.0));
}

#[test]
fn colliding_address_gets_postal_code() {
    let mut mapper = LinearMapper::new();
    let first = mapper.map(&mannerheimintie("x", "00100"), Locale::Fi);
    let second = mapper.map(&mannerheimintie("y", "00200"), Locale::Fi);

    assert_ne!(first.slug, second.slug);
    assert!(second.slug.contains("00200"), "got {}", second.slug);
}

#[test]
fn same_id_with_new_postal_code_gets_new_slug() {
    let mut mapper = LinearMapper::new();
    let first = mapper.map(&mannerheimintie("x", "00100"), Locale::Fi);
    let second = mapper.map(&mannerheimintie("x", "00200"), Locale::Fi);

    assert_eq!(first.slug, "mannerheimintie-1");
    assert_ne!(first.slug, second.slug);
    assert!(second.slug.contains("00200"), "got {}", second.slug);
}

#[test]
fn id_less_listings_at_one_address_stay_apart() {
    let at_price = |price: &str| {
        listing(json!({
            "address": "Kotikatu 1",
            "postalCode": "00100",
            "city": "Helsinki",
            "nonLocalizedValues": { "askPrice": price }
        }))
    };
    let raws = vec![at_price("200000"), at_price("310000")];

    let batch = LinearMapper::new().map_all(&raws, Locale::Fi);
    assert_ne!(batch[0].id, batch[1].id);
    assert_ne!(batch[0].slug, batch[1].slug);

    let mut mapper = LinearMapper::new();
    let one = mapper.map(&raws[0], Locale::Fi);
    let two = mapper.map(&raws[1], Locale::Fi);
    assert_ne!(one.slug, two.slug);
}

#[test]
fn repeated_listing_in_batch_gets_distinct_slugs() {
    let raw = mannerheimintie("x", "00100");
    let raws = vec![raw.clone(), raw.clone(), raw];
    let slugs: Vec<_> = LinearMapper::new()
        .map_all(&raws, Locale::Fi)
        .into_iter()
        .map(|p| p.slug)
        .collect();
    assert_eq!(
        slugs,
        vec!["mannerheimintie-1", "mannerheimintie-1-00100", "mannerheimintie-1-00100-2"]
    );
}

#[test]
fn third_collision_gets_numeric_suffix() {
    let mut mapper = LinearMapper::new();
    let slugs: Vec<String> = ["a", "b", "c"]
        .iter()
        .map(|id| mapper.map(&mannerheimintie(id, "00100"), Locale::Fi).slug)
        .collect();

    assert_eq!(slugs[0], "mannerheimintie-1");
    assert_eq!(slugs[1], "mannerheimintie-1-00100");
    assert_eq!(slugs[2], "mannerheimintie-1-00100-2");
}

#[test]
fn elevator_word_becomes_bool() {
    let raw = listing(json!({
        "address": "Kotikatu 3",
        "housingCooperativeElevator": { "fi": { "value": "Kyllä" }, "sv": { "value": "Ja" } }
    }));
    let property = LinearMapper::new().map(&raw, Locale::Sv);
    assert_eq!(property.meta.elevator, Some(true));
}

#[test]
fn energy_certificate_statement() {
    let raw = listing(json!({
        "address": "Kotikatu 3",
        "listingHasEnergyCertificate": {
            "fi": { "value": "Ei lain edellyttämää energiatodistusta" }
        }
    }));
    let property = LinearMapper::new().map(&raw, Locale::Fi);
    assert_eq!(
        property.meta.energy_certificate,
        Some(EnergyCertificateStatus::NotRequiredByLaw)
    );

    let empty = listing(json!({
        "address": "Kotikatu 3",
        "listingHasEnergyCertificate": ""
    }));
    assert_eq!(LinearMapper::new().map(&empty, Locale::Fi).meta.energy_certificate, None);
}

#[test]
fn finnish_only_text_is_not_copied_to_swedish() {
    let raw = listing(json!({
        "address": { "fi": "Kotikatu 3" },
        "description": { "fi": { "value": "Valoisa koti" }, "sv": { "value": "  " } }
    }));
    let property = LinearMapper::new().map(&raw, Locale::Sv);

    assert_eq!(property.address.fi, "Kotikatu 3");
    assert_eq!(property.address.sv, None);
    assert_eq!(property.address.en, None);
    assert_eq!(property.description.fi, "Valoisa koti");
    assert_eq!(property.description.sv, None);
    assert_eq!(property.description.resolve(Locale::Sv), "Valoisa koti");
}

#[test]
fn translations_are_kept() {
    let raw = listing(json!({
        "address": "Kotikatu 3",
        "title": {
            "fi": { "value": "Kaunis kaksio" },
            "sv": { "value": "Vacker tvåa" },
            "en": { "value": "Lovely one-bedroom" }
        }
    }));
    let property = LinearMapper::new().map(&raw, Locale::En);
    assert_eq!(property.title.sv.as_deref(), Some("Vacker tvåa"));
    assert_eq!(property.title.resolve(Locale::En), "Lovely one-bedroom");
}

#[test]
fn mapping_twice_is_idempotent() {
    let raw = mannerheimintie("x", "00100");
    let mut mapper = LinearMapper::new();
    let first = mapper.map(&raw, Locale::Fi);
    let second = mapper.map(&raw, Locale::Fi);
    assert_eq!(first, second);

    // A fresh session yields the same record too.
    assert_eq!(LinearMapper::new().map(&raw, Locale::Fi), first);
}

#[test]
fn slug_is_shared_across_locales() {
    let raw = listing(json!({
        "address": { "fi": "Aleksanterinkatu 5", "sv": "Alexandersgatan 5" },
        "nonLocalizedValues": { "id": "loc-1" }
    }));
    let mut mapper = LinearMapper::new();
    let fi = mapper.map(&raw, Locale::Fi);
    let sv = mapper.map(&raw, Locale::Sv);
    assert_eq!(fi.slug, "aleksanterinkatu-5");
    assert_eq!(sv.slug, fi.slug);
}

#[test]
fn batch_slugs_are_unique() {
    let raws: Vec<_> = (0..12)
        .map(|i| {
            let address = if i % 3 == 0 { "Ääkköstie 2" } else { "Aakkostie 2" };
            let postal_code = if i % 2 == 0 { "00100" } else { "00200" };
            listing(json!({
                "address": address,
                "postalCode": postal_code,
                "nonLocalizedValues": { "id": format!("id-{i}") }
            }))
        })
        .collect();

    let properties = LinearMapper::new().map_all(&raws, Locale::Fi);
    let unique: HashSet<_> = properties.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(unique.len(), properties.len());
    assert!(properties.iter().all(|p| p.slug.starts_with("aakkostie-2")));
}

#[test]
fn debt_never_negative() {
    let cases = [
        ("500000", "650000", Some(150_000.0)),
        ("700000", "650000", Some(0.0)),
        ("1 625 002,18 €", "1\u{a0}625\u{a0}002,18 €", Some(0.0)),
        ("0", "650000", None),
        ("", "650000", None),
    ];

    for (i, (sales, debt_free, expected)) in cases.into_iter().enumerate() {
        let raw = listing(json!({
            "address": format!("Hintakatu {i}"),
            "nonLocalizedValues": { "id": i.to_string(), "askPrice": sales, "debtFreePrice": debt_free }
        }));
        let pricing = LinearMapper::new().map(&raw, Locale::Fi).pricing;
        assert_eq!(pricing.debt, expected, "case {i}");
        assert!(pricing.debt.map_or(true, |d| d >= 0.0));
    }
}

#[test]
fn formatted_numbers_and_units() {
    let raw = listing(json!({
        "address": "Kotikatu 3",
        "livingArea": { "fi": { "value": "62,5 m²" } },
        "roomCount": "3",
        "maintenanceFee": { "fi": "245,50 €/kk" },
        "financingFee": "0 €/kk",
        "completeYear": "1962",
        "housingCooperativeFloorCount": "0"
    }));
    let property = LinearMapper::new().map(&raw, Locale::Fi);

    assert_eq!(property.dimensions.living_area, Some(62.5));
    assert_eq!(property.dimensions.rooms, Some(3.0));
    assert_eq!(property.fees.maintenance, Some(245.5));
    assert_eq!(property.fees.financing, Some(0.0));
    assert_eq!(property.meta.build_year, Some(1962));
    assert_eq!(property.meta.floor_count, None);
}

#[test]
fn type_code_and_localized_type() {
    let raw = listing(json!({
        "address": "Kotikatu 3",
        "nonLocalizedValues": { "listingType": "omakotitalo" }
    }));
    let property = LinearMapper::new().map(&raw, Locale::Fi);
    assert_eq!(property.meta.type_code, "OMAKOTITALO");

    let untyped = LinearMapper::new().map(&listing(json!({ "address": "Kotikatu 3" })), Locale::Fi);
    assert_eq!(untyped.meta.type_code, "UNKNOWN");
}

#[test]
fn rental_only_when_rent_present() {
    let rental = listing(json!({
        "address": "Vuokrakatu 1",
        "nonLocalizedValues": { "id": "r1", "rent": "1 150 €/kk", "securityDeposit": "2300" },
        "rentalContractType": { "fi": "Toistaiseksi voimassa oleva" }
    }));
    let property = LinearMapper::new().map(&rental, Locale::Fi);
    let details = property.rental.as_ref().map(|r| (r.monthly_rent, r.deposit));
    assert_eq!(details, Some((1150.0, Some(2300.0))));
    assert!(property.is_rental());

    let sale = LinearMapper::new().map(&mannerheimintie("s1", "00100"), Locale::Fi);
    assert!(sale.rental.is_none());
}

#[test]
fn agent_from_realtor_and_absent_when_empty() {
    let raw = listing(json!({
        "address": "Kotikatu 3",
        "realtor": {
            "name": "  Maija   Meikäläinen ",
            "tel": "040 123 4567",
            "email": "Maija@Example.FI",
            "image": { "url": "//cdn.example.fi/maija.jpg" }
        }
    }));
    let agent = LinearMapper::new().map(&raw, Locale::Fi).agent;
    let agent = agent.as_ref();
    assert_eq!(agent.and_then(|a| a.name.as_deref()), Some("Maija Meikäläinen"));
    assert_eq!(agent.and_then(|a| a.email.as_deref()), Some("maija@example.fi"));
    assert_eq!(
        agent.and_then(|a| a.photo.as_deref()),
        Some("https://cdn.example.fi/maija.jpg")
    );

    let bare = LinearMapper::new().map(&listing(json!({ "address": "Kotikatu 3" })), Locale::Fi);
    assert!(bare.agent.is_none());
}

#[test]
fn missing_id_and_address_still_map() {
    let property = LinearMapper::new().map(&listing(json!({})), Locale::En);
    assert!(property.id.starts_with("gen-"));
    assert_eq!(property.slug, "kohde");

    let issues: Vec<_> = validate_property(&property).iter().map(|i| i.field).collect();
    assert_eq!(issues, vec!["address.fi"]);
    assert_eq!(property.meta.type_code, "UNKNOWN");
}

#[test]
fn serializes_camel_case() {
    let property = LinearMapper::new().map(&mannerheimintie("x", "00100"), Locale::Fi);
    let value = serde_json::to_value(&property).unwrap();
    assert_eq!(value["pricing"]["debtFree"], json!(650_000.0));
    assert_eq!(value["postalCode"], json!("00100"));
    assert!(value.get("rental").is_none());
}
