// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Server, platform and CMS keywords
//!
//! The table is ordered: the first keyword found in a header value wins.
//! More specific keywords must therefore precede generic ones (for example
//! `apache-coyote` before `apache`). Reordering changes classification.

use url::form_urlencoded;

use super::ServerSignature;

/// Base URL used when no keyword matches
pub const SEARCH_URL: &str = "https://www.google.com/search?q=";

const fn sig(keyword: &'static str, name: &'static str, url: &'static str) -> ServerSignature {
    ServerSignature { keyword, name, url }
}

pub const SERVER_SIGNATURES: &[ServerSignature] = &[
    // Web servers and proxies
    sig("nginx", "nginx", "https://nginx.org/en/docs/"),
    sig("openresty", "OpenResty", "https://openresty.org/en/"),
    sig("apache-coyote", "Apache Tomcat", "https://tomcat.apache.org/"),
    sig("tomcat", "Apache Tomcat", "https://tomcat.apache.org/"),
    sig("apache", "Apache HTTP Server", "https://httpd.apache.org/docs/"),
    sig("microsoft-iis", "Microsoft IIS", "https://learn.microsoft.com/en-us/iis/"),
    sig("litespeed", "LiteSpeed", "https://docs.litespeedtech.com/"),
    sig("caddy", "Caddy", "https://caddyserver.com/docs/"),
    sig("envoy", "Envoy", "https://www.envoyproxy.io/docs"),
    sig("gunicorn", "Gunicorn", "https://docs.gunicorn.org/"),
    sig("uvicorn", "Uvicorn", "https://www.uvicorn.org/"),
    sig("jetty", "Eclipse Jetty", "https://eclipse.dev/jetty/documentation/"),
    sig("kestrel", "Kestrel", "https://learn.microsoft.com/en-us/aspnet/core/fundamentals/servers/kestrel"),
    sig("cowboy", "Cowboy", "https://ninenines.eu/docs/"),
    // Cloud platforms and CDNs
    sig("cloudflare", "Cloudflare", "https://developers.cloudflare.com/"),
    sig("cloudfront", "Amazon CloudFront", "https://docs.aws.amazon.com/cloudfront/"),
    sig("amazons3", "Amazon S3", "https://docs.aws.amazon.com/s3/"),
    sig("awselb", "AWS Elastic Load Balancing", "https://docs.aws.amazon.com/elasticloadbalancing/"),
    sig("gws", "Google Web Server", "https://cloud.google.com/docs"),
    sig("google frontend", "Google Frontend", "https://cloud.google.com/appengine/docs"),
    sig("vercel", "Vercel", "https://vercel.com/docs"),
    sig("netlify", "Netlify", "https://docs.netlify.com/"),
    sig("github.com", "GitHub Pages", "https://docs.github.com/en/pages"),
    sig("akamai", "Akamai", "https://techdocs.akamai.com/"),
    sig("fastly", "Fastly", "https://docs.fastly.com/"),
    sig("heroku", "Heroku", "https://devcenter.heroku.com/"),
    // Languages and frameworks
    sig("express", "Express", "https://expressjs.com/"),
    sig("next.js", "Next.js", "https://nextjs.org/docs"),
    sig("nuxt", "Nuxt", "https://nuxt.com/docs"),
    sig("php", "PHP", "https://www.php.net/docs.php"),
    sig("asp.net", "ASP.NET", "https://learn.microsoft.com/en-us/aspnet/"),
    sig("django", "Django", "https://docs.djangoproject.com/"),
    sig("phusion passenger", "Phusion Passenger", "https://www.phusionpassenger.com/docs/"),
    sig("servlet", "Java Servlet", "https://jakarta.ee/specifications/servlet/"),
    // CMS and static site generators
    sig("wordpress", "WordPress", "https://wordpress.org/documentation/"),
    sig("drupal", "Drupal", "https://www.drupal.org/docs"),
    sig("joomla", "Joomla", "https://docs.joomla.org/"),
    sig("wix", "Wix", "https://support.wix.com/"),
    sig("squarespace", "Squarespace", "https://support.squarespace.com/"),
    sig("shopify", "Shopify", "https://shopify.dev/docs"),
    sig("ghost", "Ghost", "https://ghost.org/docs/"),
    sig("hugo", "Hugo", "https://gohugo.io/documentation/"),
    sig("jekyll", "Jekyll", "https://jekyllrb.com/docs/"),
    sig("gatsby", "Gatsby", "https://www.gatsbyjs.com/docs/"),
    sig("docusaurus", "Docusaurus", "https://docusaurus.io/docs"),
];

/// Web search URL for a raw value
pub fn search_url(raw: &str) -> String {
    let query: String = form_urlencoded::byte_serialize(raw.as_bytes()).collect();
    format!("{}{}", SEARCH_URL, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_before_generic() {
        let position = |kw: &str| SERVER_SIGNATURES.iter().position(|s| s.keyword == kw);
        assert!(position("apache-coyote") < position("apache"));
        assert!(position("nginx") < position("php"));
    }

    #[test]
    fn test_search_url_encodes() {
        assert_eq!(
            search_url("Foo Server/1.0 (Unix)"),
            "https://www.google.com/search?q=Foo+Server%2F1.0+%28Unix%29"
        );
    }
}
