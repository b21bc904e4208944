//! Page producers. Each returns the markup for the mount point and nothing
//! else; none of them touch router state.

pub fn index() -> String {
    r#"
    <section>
      <h2>Home</h2>
      <p>Every page here is a function returning markup. Links marked with
      <code>data-link</code> are handled in place, without reloading.</p>
      <p>Read <a href="/about" data-link>about the project</a> or
      <a href="/contact" data-link>get in touch</a>.</p>
    </section>
  "#
    .to_string()
}

pub fn about() -> String {
    r#"
    <section>
      <h2>About</h2>
      <p>A starter single-page site. The router maps a path to a page,
      replaces the content of the mount point, and keeps session history in
      step so back and forward work as expected.</p>
      <ul>
        <li>No route parameters</li>
        <li>No nested layouts</li>
        <li>Unknown paths show the home page</li>
      </ul>
    </section>
  "#
    .to_string()
}

pub fn contact() -> String {
    r#"
    <section>
      <h2>Contact</h2>
      <form id="contact-form">
        <input name="name" placeholder="Your name" required />
        <input name="email" type="email" placeholder="Your email" required />
        <textarea name="message" placeholder="Your message"></textarea>
        <button type="submit">Send</button>
      </form>
    </section>
  "#
    .to_string()
}

pub fn not_found() -> String {
    r#"
    <section>
      <h2>Page not found</h2>
      <p>Nothing lives at this address. <a href="/" data-link>Back home</a>.</p>
    </section>
  "#
    .to_string()
}
