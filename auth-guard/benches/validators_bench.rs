use auth_guard::cache::ExpiringCache;
use auth_guard::core::{UserContext, ValidationOptions};
use auth_guard::forms::{FormValidator, RegistrationInput};
use auth_guard::validators::{EmailValidator, NameValidator, PasswordValidator};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::Duration;

const PASSWORDS: &[&str] = &[
    "password",
    "abcd1234",
    "Password123!",
    "Secure@789Key",
    "correct horse battery staple",
];

fn benchmark_password(c: &mut Criterion) {
    let mut group = c.benchmark_group("password_validate");
    let options = ValidationOptions::default();
    let context = UserContext::new()
        .with_email("jane.doe@example.com")
        .with_display_name("Jane Doe");

    for password in PASSWORDS {
        group.bench_with_input(BenchmarkId::new("cached", password), password, |b, pw| {
            let validator = PasswordValidator::new();
            b.iter(|| validator.validate(black_box(pw), Some(&context), &options));
        });

        group.bench_with_input(BenchmarkId::new("cold", password), password, |b, pw| {
            // Zero TTL: every lookup misses
            let validator = PasswordValidator::new()
                .with_cache(ExpiringCache::with_config(Duration::ZERO, 100));
            b.iter(|| validator.validate(black_box(pw), Some(&context), &options));
        });
    }

    group.finish();
}

fn benchmark_email(c: &mut Criterion) {
    let mut group = c.benchmark_group("email_validate");
    let options = ValidationOptions::default();

    for email in ["jane.doe@example.com", "abc@sub.mailinator.com", "a|b@example.com"] {
        group.bench_with_input(BenchmarkId::from_parameter(email), email, |b, email| {
            let validator = EmailValidator::new();
            b.iter(|| validator.validate(black_box(email), &options));
        });
    }

    // Distinct keys so the cache never hits and eviction runs
    group.bench_function("eviction_churn", |b| {
        let validator = EmailValidator::new();
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            validator.validate(&format!("user{i}@example.com"), &options)
        });
    });

    group.finish();
}

fn benchmark_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("name_validate");
    let options = ValidationOptions::default();
    let validator = NameValidator::new();

    for name in ["홍길동", "Mary-Jane O'Neil", "<script>alert(1)</script>"] {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            b.iter(|| validator.validate(black_box(name), &options));
        });
    }

    group.finish();
}

fn benchmark_registration_form(c: &mut Criterion) {
    let forms = FormValidator::new();
    let options = ValidationOptions::default();
    let input = RegistrationInput {
        email: "jane.doe@example.com",
        password: "Secure@789Key",
        confirm_password: "Secure@789Key",
        name: "Jane Doe",
    };

    c.bench_function("registration_form", |b| {
        b.iter(|| forms.validate_registration_form(black_box(input), &options));
    });
}

criterion_group!(
    benches,
    benchmark_password,
    benchmark_email,
    benchmark_name,
    benchmark_registration_form,
);

criterion_main!(benches);
