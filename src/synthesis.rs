//! Template Synthesis
//!
//! Deterministic, backend-free article synthesis. Used as the terminal
//! fallback when the backend is unreachable or never returns any text, so it
//! must never fail and its output must clear the quality gate under every
//! built-in strictness profile.
//!
//! A template is a fixed skeleton of named sections chosen by content type.
//! Each section body is fixed prose with `{placeholder}` slots filled from the
//! topic request: same topic in, same article out.

use crate::topic::{ContentType, TopicRequest};

/// Section skeleton selected from the content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateProfile {
    /// Introduction, Foundations, Exploration, Analysis, Conclusion
    Feature,
    News,
    Historical,
    Fun,
}

impl TemplateProfile {
    pub fn for_content_type(content_type: ContentType) -> Self {
        match content_type {
            ContentType::News => TemplateProfile::News,
            ContentType::Historical => TemplateProfile::Historical,
            ContentType::Fun => TemplateProfile::Fun,
            ContentType::Article | ContentType::Evergreen | ContentType::Educational => {
                TemplateProfile::Feature
            }
        }
    }

    fn intro(&self) -> Option<&'static str> {
        match self {
            TemplateProfile::Feature => None,
            TemplateProfile::News => Some(NEWS_INTRO),
            TemplateProfile::Historical => Some(HISTORICAL_INTRO),
            TemplateProfile::Fun => Some(FUN_INTRO),
        }
    }

    fn sections(&self) -> &'static [SectionTemplate] {
        match self {
            TemplateProfile::Feature => FEATURE_SECTIONS,
            TemplateProfile::News => NEWS_SECTIONS,
            TemplateProfile::Historical => HISTORICAL_SECTIONS,
            TemplateProfile::Fun => FUN_SECTIONS,
        }
    }

    fn conclusion(&self) -> &'static str {
        match self {
            TemplateProfile::Feature => FEATURE_CONCLUSION,
            TemplateProfile::News => NEWS_CONCLUSION,
            TemplateProfile::Historical => HISTORICAL_CONCLUSION,
            TemplateProfile::Fun => FUN_CONCLUSION,
        }
    }
}

struct SectionTemplate {
    heading: &'static str,
    body: &'static str,
}

/// Build the fallback article for `topic`.
pub fn synthesize(topic: &TopicRequest) -> String {
    let profile = TemplateProfile::for_content_type(topic.content_type);
    let fill = |template: &str| render(template, topic);

    let mut out = format!("# {}\n\n", topic.subject.trim());
    out.push_str("*This article was autonomously generated by autoblog.*\n\n");

    if let Some(intro) = profile.intro() {
        out.push_str(&fill(intro));
        out.push_str("\n\n");
    }

    for section in profile.sections() {
        out.push_str(&format!("## {}\n\n", section.heading));
        out.push_str(&fill(section.body));
        out.push_str("\n\n");
    }

    out.push_str("## Conclusion\n\n");
    out.push_str(&fill(profile.conclusion()));
    out.push_str("\n\n> **Note**: This is fallback content assembled from a template while the text backend was unavailable.\n");
    out
}

/// Fill `{name}` slots in one pass; substituted text is never rescanned.
fn render(template: &str, topic: &TopicRequest) -> String {
    let mut out = String::with_capacity(template.len() + 128);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let slot = after
            .find('}')
            .and_then(|close| slot_value(&after[..close], topic).map(|value| (close, value)));
        match slot {
            Some((close, value)) => {
                out.push_str(&value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn slot_value(name: &str, topic: &TopicRequest) -> Option<String> {
    let value = match name {
        "subject" => topic.subject.trim().to_string(),
        "category" => topic.category_or_default().to_string(),
        "audience" => topic.audience_or_default().to_string(),
        "angle" => topic.angle.trim().to_string(),
        "tone" => topic.tone.trim().to_string(),
        "keywords" => topic.keyword_list(),
        "type_label" => topic.content_type.label().to_lowercase(),
        _ => return None,
    };
    Some(value)
}

const FEATURE_SECTIONS: &[SectionTemplate] = &[
    SectionTemplate {
        heading: "Introduction",
        body: "{subject} is one of those ideas that rewards a closer look. This {type_label} is written for {audience} and keeps a {tone} voice throughout, because the goal is understanding rather than jargon. The angle we take here is simple: {angle}. Along the way we will touch on {keywords}, and we will try to show how each of those threads connects back to the bigger picture of {category}. By the end you should have a clear mental model of what {subject} is, why it matters, and where to look next if you want to go deeper.",
    },
    SectionTemplate {
        heading: "Foundations",
        body: "Every topic rests on a handful of basic ideas, and {subject} is no exception. Before looking at details it helps to name the core concepts, agree on the vocabulary, and understand the problem that people were originally trying to solve. Within {category}, the foundations usually come down to three questions: what is being described, what forces shape it, and how we can observe it in practice. Keeping those questions in mind makes the rest of the material far easier to follow, and it gives {audience} a stable base for judging new claims as they appear.",
    },
    SectionTemplate {
        heading: "Exploration",
        body: "With the basics in place we can explore how {subject} behaves in the real world. The most useful way to do that is to follow concrete examples, notice patterns, and ask what changes when the circumstances change. Looking at {keywords} from several directions reveals connections that are easy to miss at first glance. Some of these connections are surprising, some are intuitive, and a few challenge common assumptions about {category}. Exploring them patiently, one example at a time, is how a vague impression turns into genuine insight that you can explain to someone else.",
    },
    SectionTemplate {
        heading: "Analysis",
        body: "Stepping back from individual examples, we can analyse what they have in common. The evidence suggests that {subject} is best understood as a system of interacting parts rather than a single isolated fact. That view explains why small changes sometimes have large effects, and why experts still debate some of the finer points. It also highlights practical lessons: measure carefully, compare sources, and be wary of explanations that sound too simple. Applying this lens to {angle} gives a balanced perspective that respects both what is known and what remains uncertain.",
    },
];

const FEATURE_CONCLUSION: &str = "{subject} turns out to be richer than it first appears. We started with the foundations, explored real examples, and analysed the patterns that tie them together. The key takeaway is that curiosity and careful observation go a long way: the more closely you look at {category}, the more connections you find. Keep these ideas in mind the next time {subject} comes up in conversation, and use them as a starting point for your own questions.";

const NEWS_INTRO: &str = "In today's rapidly evolving landscape of {category}, {subject} has emerged as a significant development. This {type_label} keeps a {tone} tone and focuses on one question: {angle}. Readers following {keywords} will recognise many of the forces at work, but the combination is new, and it is worth slowing down to understand what has actually changed and what has not. The sections below walk through the background, the key developments, the likely implications, and the signals worth watching over the coming months.";

const NEWS_SECTIONS: &[SectionTemplate] = &[
    SectionTemplate {
        heading: "Background",
        body: "To understand why this matters, we need to look at the broader context. The field has been evolving rapidly, with multiple developments leading to this point. Earlier work established the groundwork, practitioners gained experience with its strengths and weaknesses, and expectations grew steadily as results improved. {subject} arrives against that backdrop, which is why it has drawn so much attention from {audience} and from people working across {category}.",
    },
    SectionTemplate {
        heading: "Key Developments",
        body: "Several key factors have contributed to this development:\n\n1. **Technical Innovation**: New approaches and methodologies have emerged that make previously impractical ideas workable.\n2. **Industry Adoption**: Organizations are increasingly recognizing the potential and are willing to invest in it.\n3. **Community Interest**: Growing engagement from developers and researchers keeps the momentum going and surfaces problems early.",
    },
    SectionTemplate {
        heading: "Implications",
        body: "This development has several important implications:\n\n- **Short-term**: Immediate impacts on current workflows and practices, especially for teams already working with {keywords}.\n- **Medium-term**: Changes in how teams approach related challenges and how they plan their next projects.\n- **Long-term**: Potential shifts in the broader landscape of {category}, including new standards and new expectations from the public.",
    },
    SectionTemplate {
        heading: "What to Watch",
        body: "As this space continues to evolve, keep an eye on:\n\n- Further announcements and updates from the people driving {subject} forward\n- Community feedback and adoption, which usually reveal the real strengths and weaknesses\n- Integration with existing tools and platforms, the step that turns headlines into everyday practice\n- Independent evaluations that test the bold claims against careful measurement",
    },
];

const NEWS_CONCLUSION: &str = "As this story continues to develop, we will keep following {subject} and report on the details that matter most. For now the picture is clear enough to act on: the change is real, its effects will spread gradually, and the people best placed to benefit are those who stay informed, ask good questions, and test new ideas carefully before adopting them. Whether you are a practitioner, a decision maker, or simply curious, the best next step is the same: read widely, compare perspectives, and revisit the question once the early excitement has settled and better evidence is available.";

const HISTORICAL_INTRO: &str = "Looking back at {subject}, we can see how much has changed over time. This {type_label} takes a {tone} approach and follows one thread in particular: {angle}. Comparing then and now is a useful way to understand {category}, because it separates lasting trends from passing excitement and shows which predictions held up. It also reminds us that progress is rarely a straight line: there were detours, false starts, and quiet periods where little seemed to happen, followed by bursts of change that reshaped expectations almost overnight.";

const HISTORICAL_SECTIONS: &[SectionTemplate] = &[
    SectionTemplate {
        heading: "The Past",
        body: "Looking back, we can see how things used to be. The landscape was different, with its own set of challenges and opportunities. Tools were more limited, information travelled more slowly, and many of today's assumptions about {keywords} had not yet formed. People worked with what they had, and their choices shaped the path that {subject} would later follow.",
    },
    SectionTemplate {
        heading: "The Transition",
        body: "Over time, several key changes occurred:\n\n1. Initial developments laid the groundwork and proved that the idea could work at all.\n2. Major milestones marked significant progress and attracted wider attention from {audience}.\n3. Recent advances have accelerated the pace, compressing years of change into months.",
    },
    SectionTemplate {
        heading: "The Present",
        body: "Today, we stand in a very different position. The changes have been substantial, affecting multiple aspects of the field. What was once experimental is now routine, and new questions have replaced the old ones. The current state of {subject} reflects both deliberate effort and a fair amount of luck, and understanding that mix helps us judge what is likely to happen next in {category}.",
    },
    SectionTemplate {
        heading: "Lessons Learned",
        body: "What can we take away from this evolution?\n\n- **Persistence matters**: Long-term progress often requires patience and steady effort.\n- **Incremental gains add up**: Small improvements compound over time into dramatic change.\n- **Context is key**: Understanding the journey helps us appreciate the destination and plan the next steps.",
    },
];

const HISTORICAL_CONCLUSION: &str = "The journey from past to present shows us not just where we have been, but hints at where we are going. {subject} changed because many people kept experimenting, sharing results, and learning from mistakes. If that pattern holds, the next chapter will be shaped the same way, one careful improvement at a time, and looking back will once again help us see forward. The best way to prepare is to study the history, notice which lessons keep repeating, and stay open to the possibility that the next big shift will come from somewhere nobody is watching yet.";

const FUN_INTRO: &str = "Let's dive into something interesting: {subject}. Trust us, it's more fascinating than it sounds! This {type_label} keeps things {tone} and takes a playful angle, {angle}, so grab a coffee and enjoy a lighter look at {category} and at {keywords}. No homework, no exams, just a handful of stories and surprising details that might change how you see something you thought you already understood.";

const FUN_SECTIONS: &[SectionTemplate] = &[
    SectionTemplate {
        heading: "Why This Is Interesting",
        body: "At first glance, this might seem like just another topic. But dig a little deeper, and you'll find some fascinating aspects. {subject} sits at a crossroads of curiosity, history, and everyday life, which means almost everyone has a personal connection to it whether they realise it or not. That is exactly what makes it such good material for a relaxed afternoon read. The best part is that you do not need any special background to enjoy it: a little curiosity and a willingness to be surprised are more than enough to get started.",
    },
    SectionTemplate {
        heading: "Surprising Facts",
        body: "Here are some things that might surprise you:\n\n1. **Did you know?**: There's more complexity here than meets the eye, even for people who work with it daily.\n2. **Fun fact**: The history behind this is more interesting than you'd expect, full of accidents and happy coincidences.\n3. **Bonus trivia**: There are connections to other areas you might not expect, from art to engineering.",
    },
    SectionTemplate {
        heading: "The Bigger Picture",
        body: "What makes this truly interesting is how it connects to broader themes:\n\n- It reflects larger trends in technology and culture that affect {audience}.\n- It shows how innovation often comes from unexpected places and unlikely people.\n- It demonstrates the creative potential of human ingenuity when people are free to play.",
    },
    SectionTemplate {
        heading: "Food for Thought",
        body: "Next time you encounter this topic, remember:\n\n- There's always more to learn, no matter how familiar something feels.\n- Curiosity leads to discovery, and discovery leads to better questions.\n- Even \"boring\" topics can be fascinating with the right perspective and a little patience.",
    },
];

const FUN_CONCLUSION: &str = "Sometimes the most interesting discoveries come from exploring the unexpected. {subject} is a great reminder that the world is full of small wonders hiding in plain sight. Share what you learned with a friend, look for the next surprising connection in {category}, and keep asking why things are the way they are, because that question rarely leads anywhere dull. If nothing else, you now have a few good stories for your next dinner party, and a fresh excuse to wander down an unexpected rabbit hole the next time curiosity strikes.";
