// Portuguese names and timezones for Brazilian places.

use serde_json::{Map, Value, json};

pub const DEFAULT_BRAZIL_TIMEZONE: &str = "America/Sao_Paulo";

const BRAZILIAN_CITIES: &[(&str, &str)] = &[
    ("são paulo", "São Paulo"),
    ("rio de janeiro", "Rio de Janeiro"),
    ("brasília", "Brasília"),
    ("salvador", "Salvador"),
    ("fortaleza", "Fortaleza"),
    ("belo horizonte", "Belo Horizonte"),
    ("manaus", "Manaus"),
    ("curitiba", "Curitiba"),
    ("recife", "Recife"),
    ("porto alegre", "Porto Alegre"),
    ("belém", "Belém"),
    ("goiânia", "Goiânia"),
    ("guarulhos", "Guarulhos"),
    ("campinas", "Campinas"),
    ("sobral", "Sobral"),
    ("santos", "Santos"),
];

const STATE_CAPITALS: &[(&str, &str)] = &[
    ("acre", "Rio Branco"),
    ("alagoas", "Maceió"),
    ("amapá", "Macapá"),
    ("amazonas", "Manaus"),
    ("bahia", "Salvador"),
    ("ceará", "Fortaleza"),
    ("distrito federal", "Brasília"),
    ("espírito santo", "Vitória"),
    ("goiás", "Goiânia"),
    ("maranhão", "São Luís"),
    ("mato grosso", "Cuiabá"),
    ("mato grosso do sul", "Campo Grande"),
    ("minas gerais", "Belo Horizonte"),
    ("pará", "Belém"),
    ("paraíba", "João Pessoa"),
    ("paraná", "Curitiba"),
    ("pernambuco", "Recife"),
    ("piauí", "Teresina"),
    ("rio de janeiro", "Rio de Janeiro"),
    ("rio grande do norte", "Natal"),
    ("rio grande do sul", "Porto Alegre"),
    ("rondônia", "Porto Velho"),
    ("roraima", "Boa Vista"),
    ("santa catarina", "Florianópolis"),
    ("são paulo", "São Paulo"),
    ("sergipe", "Aracaju"),
    ("tocantins", "Palmas"),
];

const CITY_TIMEZONES: &[(&str, &str)] = &[
    ("são paulo", "America/Sao_Paulo"),
    ("rio de janeiro", "America/Sao_Paulo"),
    ("brasília", "America/Sao_Paulo"),
    ("salvador", "America/Bahia"),
    ("fortaleza", "America/Fortaleza"),
    ("belo horizonte", "America/Sao_Paulo"),
    ("manaus", "America/Manaus"),
    ("curitiba", "America/Sao_Paulo"),
    ("recife", "America/Recife"),
    ("porto alegre", "America/Sao_Paulo"),
    ("belém", "America/Belem"),
    ("goiânia", "America/Sao_Paulo"),
    ("boa vista", "America/Boa_Vista"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    let key = key.to_lowercase();
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn portuguese_city_name(name: &str) -> String {
    lookup(BRAZILIAN_CITIES, name).map_or_else(|| name.to_string(), str::to_string)
}

pub fn state_capital(state: &str) -> Option<&'static str> {
    lookup(STATE_CAPITALS, state)
}

pub fn brazil_timezone(city: &str) -> Option<&'static str> {
    lookup(CITY_TIMEZONES, city)
}

fn is_brazilian(geoname: &Map<String, Value>) -> bool {
    geoname.get("countryCode").and_then(Value::as_str) == Some("BR")
}

fn name_of(geoname: &Map<String, Value>) -> &str {
    geoname.get("name").and_then(Value::as_str).unwrap_or("")
}

// Adds `portugueseName` to Brazilian entries of a search result when it
// differs from the name Geonames returned.
pub fn annotate_search(result: &mut Value) {
    let Some(geonames) = result.get_mut("geonames").and_then(Value::as_array_mut) else {
        return;
    };

    for geoname in geonames.iter_mut().filter_map(Value::as_object_mut) {
        if !is_brazilian(geoname) {
            continue;
        }
        let name = name_of(geoname);
        let portuguese = portuguese_city_name(name);
        if portuguese != name {
            geoname.insert("portugueseName".to_string(), Value::String(portuguese));
        }
    }
}

// Reshapes one Geonames entry into the flat location format.
pub fn format_location(geoname: &Map<String, Value>) -> Value {
    let field = |key: &str| geoname.get(key).cloned().unwrap_or(Value::Null);
    let name = name_of(geoname);
    let mut timezone = brazil_timezone(name);

    let brazilian = is_brazilian(geoname);
    if brazilian {
        timezone = timezone.or(Some(DEFAULT_BRAZIL_TIMEZONE));
    }

    let mut formatted = json!({
        "name": field("name"),
        "portuguese_name": portuguese_city_name(name),
        "country_code": field("countryCode"),
        "country_name": field("countryName"),
        "admin_code": field("adminCode1"),
        "admin_name": field("adminName1"),
        "latitude": field("lat"),
        "longitude": field("lng"),
        "population": field("population"),
        "timezone": timezone,
        "fcode": field("fcode"),
    });

    if brazilian {
        formatted["is_brazilian"] = Value::Bool(true);
    }
    formatted
}

// Annotate, then swap every Brazilian entry for its formatted version
pub fn localize_search(mut result: Value) -> Value {
    annotate_search(&mut result);

    if let Some(geonames) = result.get_mut("geonames").and_then(Value::as_array_mut) {
        for entry in geonames.iter_mut() {
            let formatted = match entry.as_object() {
                Some(geoname) if is_brazilian(geoname) => format_location(geoname),
                _ => continue,
            };
            *entry = formatted;
        }
    }
    result
}
