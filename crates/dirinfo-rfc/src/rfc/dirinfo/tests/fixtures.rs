//! Directory-information test fixtures.
//!
//! Examples taken from RFC 2425, RFC 2426 and common client output.

/// RFC 2425 §8.1 - Person entry, no BEGIN/END wrapper
pub const RFC2425_PERSON: &str = "\
cn:\r\n\
cn:Babs Jensen\r\n\
cn:Barbara J Jensen\r\n\
sn:Jensen\r\n\
email:babs@umich.edu\r\n\
phone:+1 313 747-4454\r\n\
x-id:1234567890\r\n";

/// RFC 2426 §7 - vCard 3.0
pub const VCARD_30: &str = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Frank Dawson\r\n\
ORG:Lotus Development Corporation\r\n\
ADR;TYPE=WORK,POSTAL,PARCEL:;;6544 Battleford Drive\r\n \
;Raleigh;NC;27613-3502;U.S.A.\r\n\
TEL;TYPE=VOICE,MSG,WORK:+1-919-676-9515\r\n\
TEL;TYPE=FAX,WORK:+1-919-676-9564\r\n\
EMAIL;TYPE=INTERNET,PREF:Frank_Dawson@Lotus.com\r\n\
EMAIL;TYPE=INTERNET:fdawson@earthlink.net\r\n\
URL:http://home.earthlink.net/~fdawson\r\n\
END:VCARD\r\n";

/// vCard 2.1 with bare parameters and a quoted-printable soft line break
pub const VCARD_21: &str = "\
BEGIN:VCARD\r\n\
VERSION:2.1\r\n\
N:Dawson;Frank\r\n\
TEL;WORK;VOICE:+1-919-676-9515\r\n\
ADR;WORK;ENCODING=QUOTED-PRINTABLE:;;6544 Battleford Drive=0D=0A=\r\n\
Suite 100;Raleigh;NC\r\n\
NOTE;QUOTED-PRINTABLE;CHARSET=UTF-8:Caf=C3=A9 au lait\r\n\
END:VCARD\r\n";

/// vCard 3.0 with a folded base64 PHOTO holding bytes 0x00..0x5F
pub const VCARD_WITH_PHOTO: &str = "\
BEGIN:VCARD\r\n\
VERSION:3.0\r\n\
FN:Photo Test\r\n\
PHOTO;ENCODING=b;TYPE=PNG:AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8gISIjJ\r\n \
CUmJygpKissLS4vMDEyMzQ1Njc4OTo7PD0+P0BBQkNERUZHSElKS0xNTk9QUVJTVFVWV1hZW\r\n \
ltcXV5f\r\n\
END:VCARD\r\n";

/// Grouped fields as written by address book clients, LF line endings
pub const VCARD_GROUPED: &str = "\
BEGIN:VCARD\n\
VERSION:3.0\n\
FN:Jane Appleseed\n\
item1.EMAIL;type=INTERNET;type=pref:jane@example.com\n\
item1.X-ABLabel:_$!<Work>!$_\n\
item2.ADR;type=HOME:;;1 Infinite Loop;Cupertino;CA;95014;USA\n\
item2.X-ABADR:us\n\
X-SOCIALPROFILE;type=\"x-custom:label\";x-user=jane:https://example.com/jane\n\
END:VCARD\n";

/// vCalendar 1.0 with nested entities and date values
pub const VCALENDAR_NESTED: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:1.0\r\n\
BEGIN:VEVENT\r\n\
DTSTART:19961022T140000\r\n\
DTEND:19961022T160000Z\r\n\
SUMMARY:Design review\\, part 2\r\n\
RDATE:19961029T140000,19961105T140000\r\n\
END:VEVENT\r\n\
BEGIN:VTODO\r\n\
DUE:19961025\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

/// BEGIN:VCARD closed by END:VEVENT
pub const MISMATCHED: &str = "\
BEGIN:VCARD\r\n\
FN:Nobody\r\n\
END:VEVENT\r\n";

/// A card with one line that is not a content line
pub const WITH_GARBAGE: &str = "\
BEGIN:VCARD\r\n\
FN:Somebody\r\n\
this line has no colon\r\n\
END:VCARD\r\n";
