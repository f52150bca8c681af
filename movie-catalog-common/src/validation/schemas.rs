//! Schemas for every form of the application along with the field names they declare

use lazy_regex::{regex, Lazy, Regex};

use super::{Rule, Schema};

/// Name of a user, movie or person
pub const NAME: &str = "name";
/// Account email
pub const EMAIL: &str = "email";
/// Account password
pub const PASSWORD: &str = "password";
/// Person gender code
pub const GENDER: &str = "gender";
/// Person date of birth
pub const DOB: &str = "dob";
/// Person biography
pub const BIO: &str = "bio";
/// Movie release year
pub const YEAR_OF_RELEASE: &str = "year_of_release";
/// Movie synopsis
pub const PLOT: &str = "plot";
/// Movie poster URL
pub const POSTER: &str = "poster";
/// Ids of the movie cast
pub const ACTORS: &str = "actors";
/// Id of the movie producer
pub const PRODUCER: &str = "producer";

/// Accepted values of [GENDER]
pub const GENDER_OPTIONS: &[&str] = &["M", "F", "O"];
/// Earliest accepted release year
pub const MIN_YEAR: i64 = 1900;
/// Latest accepted release year
pub const MAX_YEAR: i64 = 2999;

/// Something, an `@`, a domain and a dot suffix, without whitespace
static EMAIL_REGEX: &Lazy<Regex, fn() -> Regex> = regex!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$");
/// Matched against the whole value, so a query string after the extension does not pass
static POSTER_REGEX: &Lazy<Regex, fn() -> Regex> = regex!(r"\.(jpg|jpeg|png|webp|avif|gif|svg)$");

/// Shared by every mandatory field
const REQUIRED: Rule = Rule::Required {
    message: "Required!!!",
};
/// Shared by every name field
const NAME_LENGTH: Rule = Rule::MinLength {
    min: 2,
    message: "Name should have atleast 2 characters",
};

/// Rules of the email field of the login and register forms
fn email_rules() -> Vec<Rule> {
    vec![
        REQUIRED,
        Rule::Pattern {
            regex: EMAIL_REGEX,
            message: "Invalid Email!!!",
        },
    ]
}

/// Rules of the password field of the login and register forms
fn password_rules() -> Vec<Rule> {
    vec![
        REQUIRED,
        Rule::MinLength {
            min: 5,
            message: "Password must have atleast 5 characters",
        },
    ]
}

/// Login form: email and password
pub fn login() -> Schema {
    Schema::new()
        .text(EMAIL, email_rules())
        .text(PASSWORD, password_rules())
}

/// Registration form: name, email and password
pub fn register() -> Schema {
    Schema::new()
        .text(NAME, vec![REQUIRED, NAME_LENGTH])
        .text(EMAIL, email_rules())
        .text(PASSWORD, password_rules())
}

/// Actor and producer quick-add forms share this schema
pub fn person() -> Schema {
    Schema::new()
        .text(NAME, vec![REQUIRED, NAME_LENGTH])
        .text(
            GENDER,
            vec![
                REQUIRED,
                Rule::OneOf {
                    options: GENDER_OPTIONS,
                    message: "Gender must be one of M, F or O",
                },
            ],
        )
        .text(
            DOB,
            vec![
                REQUIRED,
                Rule::Date {
                    message: "Invalid date",
                },
                Rule::DateBeforeToday {
                    message: "DOB must be less than current date",
                },
            ],
        )
        .text(BIO, vec![REQUIRED])
}

/// Add and edit movie form
pub fn movie() -> Schema {
    Schema::new()
        .text(NAME, vec![REQUIRED, NAME_LENGTH])
        .text(
            YEAR_OF_RELEASE,
            vec![
                REQUIRED,
                Rule::Number {
                    message: "Only digits",
                },
                Rule::Integer {
                    message: "Cannot be a decimal",
                },
                Rule::Positive {
                    message: "Year cannot be negative",
                },
                Rule::DigitCount {
                    digits: 4,
                    message: "Year must have exactly 4 digits",
                },
                Rule::Range {
                    min: MIN_YEAR,
                    max: MAX_YEAR,
                    message: "Year must be greater than or equal to 1900 and less than or equal to 2999",
                },
            ],
        )
        .text(PLOT, vec![REQUIRED])
        .text(
            POSTER,
            vec![
                REQUIRED,
                Rule::Url {
                    message: "Please enter a valid url",
                },
                Rule::Pattern {
                    regex: POSTER_REGEX,
                    message: "Please enter valid Image url",
                },
            ],
        )
        .list(ACTORS, vec![REQUIRED])
        .text(PRODUCER, vec![REQUIRED])
}

#[cfg(test)]
mod test {
    use chrono::{Days, NaiveDate};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::validation::{FormValues, ValidationContext};

    #[fixture]
    fn context() -> ValidationContext {
        ValidationContext::for_date(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap())
    }

    fn valid_movie() -> FormValues {
        FormValues::new()
            .with(NAME, "Inception")
            .with(YEAR_OF_RELEASE, "2010")
            .with(PLOT, "A thief who steals corporate secrets")
            .with(POSTER, "https://images.example.com/inception.jpg")
            .with(ACTORS, vec!["a1".to_owned(), "a2".to_owned()])
            .with(PRODUCER, "p1")
    }

    fn valid_person(dob: &str) -> FormValues {
        FormValues::new()
            .with(NAME, "Tom Hardy")
            .with(GENDER, "M")
            .with(DOB, dob)
            .with(BIO, "English actor")
    }

    #[rstest]
    fn valid_movie_should_have_no_errors(context: ValidationContext) {
        let errors = movie().validate(&valid_movie(), &context);

        assert!(errors.is_empty(), "{errors:?}");
    }

    #[rstest]
    #[case::lower_bound("1900", None)]
    #[case::upper_bound("2999", None)]
    #[case::below_range("1899", Some("Year must be greater than or equal to 1900 and less than or equal to 2999"))]
    #[case::above_range("3000", Some("Year must be greater than or equal to 1900 and less than or equal to 2999"))]
    #[case::two_digits("99", Some("Year must have exactly 4 digits"))]
    #[case::leading_zero("0999", Some("Year must have exactly 4 digits"))]
    #[case::five_digits("19999", Some("Year must have exactly 4 digits"))]
    #[case::negative("-1999", Some("Year cannot be negative"))]
    #[case::decimal("1999.5", Some("Cannot be a decimal"))]
    #[case::letters("19a9", Some("Only digits"))]
    #[case::blank("", Some("Required!!!"))]
    fn year_of_release_should_require_four_digit_year_in_range(
        context: ValidationContext,
        #[case] year: &str,
        #[case] expected: Option<&str>,
    ) {
        let values = valid_movie().with(YEAR_OF_RELEASE, year);

        let errors = movie().validate(&values, &context);

        assert_eq!(errors.get(YEAR_OF_RELEASE), expected, "year `{year}`");
    }

    #[rstest]
    #[case("https://x.com/a.jpg", None)]
    #[case("https://x.com/a.jpeg", None)]
    #[case("https://x.com/a.png", None)]
    #[case("https://x.com/a.webp", None)]
    #[case("https://x.com/a.avif", None)]
    #[case("https://x.com/a.gif", None)]
    #[case("https://x.com/a.svg", None)]
    #[case::upper_case_extension("http://x.com/a.JPG", Some("Please enter valid Image url"))]
    #[case::query_after_extension("https://x.com/a.jpg?w=300", Some("Please enter valid Image url"))]
    #[case::not_an_image("https://x.com/a.txt", Some("Please enter valid Image url"))]
    #[case::not_a_url("a.jpg", Some("Please enter a valid url"))]
    fn poster_should_require_image_url(
        context: ValidationContext,
        #[case] poster: &str,
        #[case] expected: Option<&str>,
    ) {
        let values = valid_movie().with(POSTER, poster);

        let errors = movie().validate(&values, &context);

        assert_eq!(errors.get(POSTER), expected, "poster `{poster}`");
    }

    #[rstest]
    fn movie_without_actors_or_producer_should_fail(context: ValidationContext) {
        let values = valid_movie()
            .with(ACTORS, Vec::<String>::new())
            .with(PRODUCER, "");

        let errors = movie().validate(&values, &context);

        assert_eq!(errors.get(ACTORS), Some("Required!!!"));
        assert_eq!(errors.get(PRODUCER), Some("Required!!!"));
        assert_eq!(errors.len(), 2);
    }

    #[rstest]
    fn dob_should_be_strictly_before_today(context: ValidationContext) {
        let today = context.today;
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap();
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
        let schema = person();

        let format = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
        let on_today = schema.validate(&valid_person(&format(today)), &context);
        let on_yesterday = schema.validate(&valid_person(&format(yesterday)), &context);
        let on_tomorrow = schema.validate(&valid_person(&format(tomorrow)), &context);

        assert_eq!(on_today.get(DOB), Some("DOB must be less than current date"));
        assert_eq!(on_yesterday.get(DOB), None);
        assert_eq!(on_tomorrow.get(DOB), Some("DOB must be less than current date"));
    }

    #[rstest]
    #[case("M", None)]
    #[case("F", None)]
    #[case("O", None)]
    #[case("Male", Some("Gender must be one of M, F or O"))]
    #[case("", Some("Required!!!"))]
    fn gender_should_be_one_of_options(
        context: ValidationContext,
        #[case] gender: &str,
        #[case] expected: Option<&str>,
    ) {
        let values = valid_person("1977-11-15").with(GENDER, gender);

        let errors = person().validate(&values, &context);

        assert_eq!(errors.get(GENDER), expected);
    }

    #[rstest]
    #[case("someone@example.com", "secret", None, None)]
    #[case("someone@example", "secret", Some("Invalid Email!!!"), None)]
    #[case("", "", Some("Required!!!"), Some("Required!!!"))]
    #[case("someone@example.com", "1234", None, Some("Password must have atleast 5 characters"))]
    fn login_should_check_email_and_password(
        context: ValidationContext,
        #[case] email: &str,
        #[case] password: &str,
        #[case] email_error: Option<&str>,
        #[case] password_error: Option<&str>,
    ) {
        let values = FormValues::new().with(EMAIL, email).with(PASSWORD, password);

        let errors = login().validate(&values, &context);

        assert_eq!(errors.get(EMAIL), email_error);
        assert_eq!(errors.get(PASSWORD), password_error);
    }

    #[rstest]
    #[case::leading_space(" a", Some("Name should have atleast 2 characters"))]
    #[case::trailing_space("a  ", Some("Name should have atleast 2 characters"))]
    #[case::two_characters("ab", None)]
    #[case::padded_two_characters(" ab ", None)]
    fn name_length_should_ignore_surrounding_whitespace(
        context: ValidationContext,
        #[case] name: &str,
        #[case] expected: Option<&str>,
    ) {
        let movie_errors = movie().validate(&valid_movie().with(NAME, name), &context);
        let person_errors = person().validate(&valid_person("1977-11-15").with(NAME, name), &context);

        assert_eq!(movie_errors.get(NAME), expected, "name `{name}`");
        assert_eq!(person_errors.get(NAME), expected, "name `{name}`");
    }

    #[rstest]
    fn register_should_require_name_first(context: ValidationContext) {
        let values = FormValues::new()
            .with(NAME, "J")
            .with(EMAIL, "bad")
            .with(PASSWORD, "secret");

        let errors = register().validate(&values, &context);

        assert_eq!(
            errors.first(),
            Some((NAME, "Name should have atleast 2 characters"))
        );
        assert_eq!(errors.get(EMAIL), Some("Invalid Email!!!"));
    }
}
