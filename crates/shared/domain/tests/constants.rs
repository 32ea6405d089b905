use cdesk_domain::constants::{CONTACT, CONTACT_PATH, CONTACTS_TAG, ENV_PREFIX, SEQUENCE};

#[test]
fn constants_match_schema_and_routes() {
    assert_eq!(CONTACT, "contact");
    assert_eq!(SEQUENCE, "sequence");
    assert_eq!(CONTACT_PATH, "/api/contact");
    assert_eq!(CONTACTS_TAG, "Contacts");
    assert_eq!(ENV_PREFIX, "CDESK");
}
