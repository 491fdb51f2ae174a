//! Template-based content generation.
//!
//! Each content type fills a fixed markdown template with the prompt. No
//! model is involved; the output is deterministic for a given prompt.

/// Kind of content to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    Blog,
    Code,
    Email,
    Social,
    Story,
    #[default]
    General,
}

impl ContentType {
    /// Resolve a requested type name. Unrecognized names become `General`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "blog" => ContentType::Blog,
            "code" => ContentType::Code,
            "email" => ContentType::Email,
            "social" => ContentType::Social,
            "story" => ContentType::Story,
            _ => ContentType::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Code => "code",
            ContentType::Email => "email",
            ContentType::Social => "social",
            ContentType::Story => "story",
            ContentType::General => "general",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `prompt` with the template for `kind`.
pub fn generate(kind: ContentType, prompt: &str) -> String {
    match kind {
        ContentType::Blog => blog(prompt),
        ContentType::Code => code(prompt),
        ContentType::Email => email(prompt),
        ContentType::Social => social(prompt),
        ContentType::Story => story(prompt),
        ContentType::General => general(prompt),
    }
}

/// First character upper-cased, the rest untouched.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `#word` per whitespace-separated word, letters only. Words with no letters are dropped.
pub fn hashtags(topic: &str) -> String {
    topic
        .split_whitespace()
        .map(|word| word.chars().filter(|c| c.is_ascii_alphabetic()).collect::<String>())
        .filter(|word| !word.is_empty())
        .map(|word| format!("#{}", word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn blog(topic: &str) -> String {
    let title = capitalize(topic);
    format!(
        "# {title}

## Introduction
In today's fast-paced world, understanding {topic} has become increasingly important. This comprehensive guide will explore the key aspects and provide actionable insights.

## Understanding the Basics
{title} encompasses several fundamental concepts that every practitioner should master. Let's break down the essentials:

1. **Foundation**: Building a strong understanding starts with the basics
2. **Practice**: Consistent application leads to mastery
3. **Innovation**: Always look for ways to improve and adapt

## Key Strategies
- Start with clear objectives
- Measure your progress regularly
- Learn from both successes and failures
- Stay updated with latest developments

## Conclusion
Mastering {topic} is a journey, not a destination. With dedication and the right approach, anyone can achieve excellence in this field.

---
*Generated by FormAT*"
    )
}

fn code(topic: &str) -> String {
    let lower = topic.to_lowercase();

    if lower.contains("function") || lower.contains("javascript") || lower.contains("js") {
        return format!(
            "```javascript
// {topic}
function processData(data) {{
  // Validate input
  if (!data || typeof data !== 'object') {{
    throw new Error('Invalid data provided');
  }}

  // Process the data
  const result = Object.entries(data).map(([key, value]) => ({{
    key,
    value,
    processed: true,
    timestamp: new Date().toISOString()
  }}));

  return result;
}}

// Example usage
const sample = {{ name: 'FormAT', type: 'AI' }};
console.log(processData(sample));
```

*Generated by FormAT - Customize as needed!*"
        );
    }

    if lower.contains("python") {
        return format!(
            "```python
# {topic}
def process_data(data: dict) -> list:
    \"\"\"
    Process and transform input data.

    Args:
        data: Dictionary containing data to process

    Returns:
        List of processed data entries
    \"\"\"
    if not isinstance(data, dict):
        raise ValueError(\"Invalid data provided\")

    result = [
        {{
            \"key\": key,
            \"value\": value,
            \"processed\": True
        }}
        for key, value in data.items()
    ]

    return result

# Example usage
if __name__ == \"__main__\":
    sample = {{\"name\": \"FormAT\", \"type\": \"AI\"}}
    print(process_data(sample))
```

*Generated by FormAT*"
        );
    }

    format!(
        "```
// {topic}
// Generic code template

class Solution {{
  constructor() {{
    this.data = [];
  }}

  process(input) {{
    // Add your logic here
    return input;
  }}

  validate(input) {{
    return input !== null && input !== undefined;
  }}
}}

// Usage
const solution = new Solution();
console.log(solution.process(\"Hello World\"));
```

*Customize this template for your specific needs!*"
    )
}

fn email(topic: &str) -> String {
    format!(
        "**Subject: {topic}**

Dear [Recipient],

I hope this message finds you well. I am writing to discuss {topic}.

**Key Points:**
- Point 1: [Your first key point]
- Point 2: [Your second key point]
- Point 3: [Your third key point]

I would appreciate the opportunity to discuss this further at your earliest convenience. Please let me know a suitable time for a brief call or meeting.

Thank you for your time and consideration.

Best regards,
[Your Name]

---
*Template generated by FormAT*"
    )
}

fn social(topic: &str) -> String {
    let tags = hashtags(topic);
    let footer = if tags.is_empty() {
        "#FormAT #AI".to_string()
    } else {
        format!("{} #FormAT #AI", tags)
    };
    format!(
        "📢 Let's talk about {topic}!

Here's what you need to know:

✅ It's more important than ever
✅ Taking action makes a difference
✅ Together we can achieve more

What are your thoughts? Drop a comment below! 👇

{footer}"
    )
}

fn story(topic: &str) -> String {
    let title = capitalize(topic);
    format!(
        "# The Journey of {title}

Once upon a time, in a world not so different from our own, there existed a remarkable story about {topic}.

## Chapter 1: The Beginning
It all started on an ordinary day, when something extraordinary was about to unfold. The protagonist discovered that {topic} held more significance than anyone could have imagined.

## Chapter 2: The Challenge
But challenges lay ahead. Questions arose, doubts emerged, and the path forward seemed unclear. Yet determination prevailed, guiding the journey through uncertain times.

## Chapter 3: The Revelation
Through perseverance and wisdom, understanding dawned like the morning sun. {title} wasn't just a concept; it was a key to transformation.

## Epilogue
And so, the story continues, inspiring others to embark on their own journeys of discovery.

*The End... or perhaps, just the beginning.*

---
*Story crafted by FormAT*"
    )
}

fn general(prompt: &str) -> String {
    let title = capitalize(prompt);
    format!(
        "## {title}

Here's a comprehensive overview based on your request:

**Overview**
{prompt} is a topic that encompasses various aspects worth exploring. Understanding its fundamentals can provide valuable insights.

**Key Points**
1. Foundation: Every great understanding begins with basics
2. Application: Knowledge becomes powerful when applied
3. Growth: Continuous learning leads to mastery

**Practical Tips**
- Start with what you know and build from there
- Ask questions and seek understanding
- Practice regularly and track your progress

**Next Steps**
Consider diving deeper into specific aspects that interest you most. Use /search to find more detailed information or /ask for specific questions.

---
*Generated by FormAT*"
    )
}
