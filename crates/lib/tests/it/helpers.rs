use sitebuilder::{
    Instance, Session,
    store::InMemory,
    user::{AdminSeed, User},
};

/// Password used for the seeded administrator in tests.
pub const ADMIN_PASSWORD: &str = "admin-seed-password";

/// Creates an instance over a fresh in-memory store.
pub fn test_instance() -> Instance {
    Instance::open(Box::new(InMemory::new()))
}

/// Creates an instance with the administrator account seeded.
pub fn test_instance_with_admin() -> Instance {
    let instance = test_instance();
    let created = instance
        .ensure_admin(Some(&AdminSeed::new(ADMIN_PASSWORD)))
        .expect("Failed to seed admin");
    assert!(created);
    instance
}

/// Signs up `username` with `password` and returns the created user.
pub fn signup(instance: &Instance, username: &str, password: &str) -> User {
    instance
        .signup(username, username, password)
        .expect("Failed to sign up")
}

/// Signs up `username` and returns a logged-in session for them.
pub fn login_new_user(instance: &Instance, username: &str) -> Session {
    let password = format!("{username}-password");
    let user = signup(instance, username, &password);
    let mut session = Session::anonymous();
    instance
        .login(&mut session, &user.email, &password)
        .expect("Failed to log in");
    session
}

/// Logs the administrator in.
pub fn login_admin(instance: &Instance) -> Session {
    let mut session = Session::anonymous();
    instance
        .login(
            &mut session,
            sitebuilder::constants::ADMIN_EMAIL,
            ADMIN_PASSWORD,
        )
        .expect("Failed to log in admin");
    session
}
